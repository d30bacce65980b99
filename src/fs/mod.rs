use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Recursively lists the code files under `root`.
///
/// Directories named in `skip_dirs` are never descended into, and only files whose
/// extension is listed in `extensions` are returned. Gitignore rules are deliberately
/// not applied: generated-but-committed sources still need auditing.
pub fn walk_source_files(
    root: &Path,
    skip_dirs: &[String],
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);

    // In the override builder "!glob" means IGNORE the match.
    let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
    for dir in skip_dirs {
        override_builder.add(&format!("!{}/", dir))?;
    }
    let overrides = override_builder.build()?;

    builder
        .overrides(overrides)
        .standard_filters(false)
        .hidden(false);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && has_extension(entry.path(), extensions)
                {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("Error walking directory: {}", err),
        }
    }

    files.sort();
    Ok(files)
}

/// True when the path's extension is one of `extensions`.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known == ext))
}

/// Lexically folds `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Renders `path` relative to `root` with forward slashes, falling back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["ts".to_string(), "tsx".to_string()]
    }

    #[test]
    fn test_walk_skips_dependency_and_build_dirs() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::create_dir_all(root.join("components"))?;
        fs::create_dir_all(root.join("node_modules/pkg"))?;
        fs::create_dir_all(root.join(".next/server"))?;
        File::create(root.join("components/Hero.tsx"))?;
        File::create(root.join("components/hero.css"))?;
        File::create(root.join("node_modules/pkg/index.ts"))?;
        File::create(root.join(".next/server/page.ts"))?;

        let skip = vec!["node_modules".to_string(), ".next".to_string()];
        let paths = walk_source_files(root, &skip, &exts())?;

        let names: Vec<String> = paths.iter().map(|p| display_relative(p, root)).collect();
        assert_eq!(names, vec!["components/Hero.tsx".to_string()]);
        Ok(())
    }

    #[test]
    fn test_walk_ignores_gitignore() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "generated.ts\n")?;
        File::create(root.join("generated.ts"))?;

        let paths = walk_source_files(root, &[], &exts())?;
        assert_eq!(paths.len(), 1);
        Ok(())
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/repo/src/app/../lib/./utils")),
            PathBuf::from("/repo/src/lib/utils")
        );
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }
}
