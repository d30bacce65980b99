use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::fs::{has_extension, normalize_path};

/// Maps import specifiers onto files inside the project.
#[derive(Debug, Clone)]
pub struct Resolver {
    project_root: PathBuf,
    source_root: PathBuf,
    /// Project-root spelling of the source directory, e.g. "src/"
    source_prefix: String,
    alias_prefix: String,
    extensions: Vec<String>,
}

impl Resolver {
    pub fn new(
        project_root: &Path,
        source_dir: &Path,
        alias_prefix: &str,
        extensions: &[String],
    ) -> Self {
        let source_prefix = format!(
            "{}/",
            source_dir.to_string_lossy().trim_end_matches('/')
        );
        Self {
            project_root: project_root.to_path_buf(),
            source_root: normalize_path(&project_root.join(source_dir)),
            source_prefix,
            alias_prefix: alias_prefix.to_string(),
            extensions: extensions.to_vec(),
        }
    }

    /// Resolves `specifier` as written in `importing_file`.
    ///
    /// Returns `None` for package imports and for anything that does not land on an
    /// existing code file. Never fails.
    pub fn resolve(&self, specifier: &str, importing_file: &Path) -> Option<PathBuf> {
        let base = self.base_path(specifier, importing_file)?;
        self.probe(&normalize_path(&base))
    }

    fn base_path(&self, specifier: &str, importing_file: &Path) -> Option<PathBuf> {
        if !self.alias_prefix.is_empty()
            && let Some(rest) = specifier.strip_prefix(&self.alias_prefix)
        {
            return Some(self.source_root.join(rest));
        }

        let rooted = specifier.strip_prefix('/').unwrap_or(specifier);
        if rooted.starts_with(&self.source_prefix) {
            return Some(self.project_root.join(rooted));
        }

        if specifier.starts_with('.') {
            let dir = importing_file.parent()?;
            return Some(dir.join(specifier));
        }

        // Bare specifier: an npm package.
        None
    }

    fn probe(&self, base: &Path) -> Option<PathBuf> {
        if has_extension(base, &self.extensions) && base.is_file() {
            return Some(base.to_path_buf());
        }

        for ext in &self.extensions {
            let candidate = append_extension(base, ext);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        for ext in &self.extensions {
            let candidate = base.join(format!("index.{}", ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }
}

// `Path::with_extension` would clobber dotted stems like `button.client`.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}
