use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A root-relative asset referenced in source that is not present under the public dir.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MissingAsset {
    pub referenced_by: PathBuf,
    pub asset: String,
}

/// Finds string literals that point at files served from the public directory.
#[derive(Debug, Clone)]
pub struct AssetScanner {
    src_attr: Regex,
    image_literal: Regex,
}

impl AssetScanner {
    pub fn new(image_extensions: &[String]) -> anyhow::Result<Self> {
        let alternation = image_extensions
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");

        // src="/dog.jpg", src={'/dog.jpg'}
        let src_attr = Regex::new(r#"\bsrc\s*=\s*\{?\s*["'](/[^/"'\s][^"'\s]*)["']"#)?;
        // "/images/cat.webp", '/og.png?v=2'
        let image_literal = Regex::new(&format!(
            r#"(?i)["'`](/[^/"'`\s][^"'`\s]*\.(?:{})(?:[?#][^"'`\s]*)?)["'`]"#,
            alternation
        ))?;

        Ok(Self {
            src_attr,
            image_literal,
        })
    }

    /// Root-relative paths referenced by `content`, query and fragment stripped,
    /// sorted and deduplicated.
    pub fn references(&self, content: &str) -> Vec<String> {
        let mut refs: Vec<String> = self
            .src_attr
            .captures_iter(content)
            .chain(self.image_literal.captures_iter(content))
            .filter_map(|caps| caps.get(1))
            .map(|m| strip_suffix(m.as_str()).to_string())
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }
}

fn strip_suffix(asset: &str) -> &str {
    asset
        .split(['?', '#'])
        .next()
        .unwrap_or(asset)
}

/// Where `asset` would live on disk.
pub fn public_path(public_root: &Path, asset: &str) -> PathBuf {
    public_root.join(asset.trim_start_matches('/'))
}

/// Checks each reference against the public dir and keeps the ones that do not exist.
pub fn missing_assets(
    public_root: &Path,
    referenced_by: &Path,
    references: &[String],
) -> Vec<MissingAsset> {
    references
        .iter()
        .filter(|asset| !public_path(public_root, asset).exists())
        .map(|asset| MissingAsset {
            referenced_by: referenced_by.to_path_buf(),
            asset: asset.clone(),
        })
        .collect()
}
