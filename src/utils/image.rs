use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),
    #[error("image path has no file name: {0}")]
    NoFileName(PathBuf),
}

#[derive(Debug, Clone)]
pub struct VariantOptions {
    /// Target widths in pixels; wider than the source are skipped
    pub widths: Vec<u32>,
    pub jpeg_quality: u8,
    /// Width of the blurred-in placeholder
    pub placeholder_width: u32,
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self {
            widths: vec![480, 960, 1600],
            jpeg_quality: 80,
            placeholder_width: 16,
        }
    }
}

/// Files written next to the source image.
#[derive(Debug, Clone, Default)]
pub struct ImageVariants {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub files: Vec<PathBuf>,
    pub placeholder: PathBuf,
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageOutputFormat::Jpeg(quality))
        .context("Failed to encode JPEG")?;
    Ok(buffer.into_inner())
}

fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as f64 * target_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}

/// Widths to produce for a source `width` pixels wide: sorted, deduplicated, never
/// upscaled. A source narrower than every target yields its own width.
pub fn target_widths(width: u32, requested: &[u32]) -> Vec<u32> {
    let mut widths: Vec<u32> = requested
        .iter()
        .copied()
        .filter(|w| *w > 0 && *w <= width)
        .collect();
    widths.sort_unstable();
    widths.dedup();
    if widths.is_empty() {
        widths.push(width);
    }
    widths
}

/// Writes resized JPEG and PNG variants plus a base64 data-URL placeholder
/// alongside `input`.
pub fn convert_image(input: &Path, options: &VariantOptions) -> Result<ImageVariants> {
    if !input.is_file() {
        return Err(VariantError::NotFound(input.to_path_buf()).into());
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| VariantError::NoFileName(input.to_path_buf()))?;
    let dir = input.parent().unwrap_or(Path::new("."));

    let img = image::open(input).with_context(|| format!("Failed to open image: {:?}", input))?;
    let (width, height) = img.dimensions();

    let mut files = Vec::new();
    for target in target_widths(width, &options.widths) {
        let resized = if target == width {
            img.clone()
        } else {
            img.resize_exact(target, scaled_height(width, height, target), FilterType::Lanczos3)
        };

        let jpeg_path = dir.join(format!("{}-{}.jpg", stem, target));
        std::fs::write(&jpeg_path, encode_jpeg(&resized, options.jpeg_quality)?)
            .with_context(|| format!("Failed to write {:?}", jpeg_path))?;
        files.push(jpeg_path);

        let png_path = dir.join(format!("{}-{}.png", stem, target));
        resized
            .save_with_format(&png_path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {:?}", png_path))?;
        files.push(png_path);
    }

    let tiny_width = options.placeholder_width.clamp(1, width);
    let tiny = img.resize_exact(
        tiny_width,
        scaled_height(width, height, tiny_width),
        FilterType::Triangle,
    );
    let data_url = format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(encode_jpeg(&tiny, 50)?)
    );
    let placeholder = dir.join(format!("{}.placeholder.txt", stem));
    std::fs::write(&placeholder, data_url)
        .with_context(|| format!("Failed to write {:?}", placeholder))?;

    info!("Wrote {} variants for {:?}", files.len(), input);
    Ok(ImageVariants {
        source: input.to_path_buf(),
        width,
        height,
        files,
        placeholder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    #[test]
    fn test_target_widths() {
        assert_eq!(target_widths(1200, &[480, 960, 1600, 960]), vec![480, 960]);
        assert_eq!(target_widths(300, &[480, 960]), vec![300]);
    }

    #[test]
    fn test_convert_writes_variants_and_placeholder() -> Result<()> {
        let temp = TempDir::new()?;
        let src = temp.path().join("spaniel.png");
        let img = ImageBuffer::from_pixel(600, 400, Rgba([200u8, 120, 40, 255]));
        img.save(&src)?;

        let variants = convert_image(&src, &VariantOptions::default())?;
        assert_eq!((variants.width, variants.height), (600, 400));
        assert!(temp.path().join("spaniel-480.jpg").exists());
        assert!(temp.path().join("spaniel-480.png").exists());
        assert!(!temp.path().join("spaniel-960.jpg").exists());

        let resized = image::open(temp.path().join("spaniel-480.png"))?;
        assert_eq!(resized.dimensions(), (480, 320));

        let placeholder = std::fs::read_to_string(&variants.placeholder)?;
        assert!(placeholder.starts_with("data:image/jpeg;base64,"));
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let err = convert_image(Path::new("/no/such/dog.jpg"), &VariantOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VariantError>(),
            Some(VariantError::NotFound(_))
        ));
    }
}
