use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the optional configuration file read from the project root
pub const CONFIG_FILE: &str = "pawprint.toml";

/// Rendering used for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFormat {
    #[default]
    Plain,
    Html,
    Json,
}

/// Top-level configuration for pawprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PawprintConfig {
    pub audit: AuditConfig,
    pub search: SearchConfig,
}

/// Settings for the usage audit, the pruning step and the route listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Project root (the directory holding package.json / next.config.*)
    pub project_root: PathBuf,
    /// Primary source directory, relative to the project root
    pub source_dir: PathBuf,
    /// Application routes directory, relative to the source directory
    pub app_dir: PathBuf,
    /// Public assets directory, relative to the project root
    pub public_dir: PathBuf,
    /// Import alias that maps onto the source directory (e.g. "@/")
    pub alias_prefix: String,
    /// Recognised code extensions, in resolution order
    pub code_extensions: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
    /// File stems the framework invokes by convention under the app directory
    pub route_conventions: Vec<String>,
    /// Project configuration files (relative to the project root) that are always kept
    pub config_files: Vec<String>,
    /// Extensions that make a quoted root-relative string count as an image reference
    pub image_extensions: Vec<String>,
    /// Markdown report output, relative to the project root
    pub report_path: PathBuf,
    /// Machine-readable candidates output, relative to the project root
    pub candidates_path: PathBuf,
    /// Deletion plan output, relative to the project root
    pub plan_path: PathBuf,
}

/// Settings for the static search scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Document catalog (TOML or JSON). The bundled catalog is used when unset.
    pub catalog: Option<PathBuf>,
    pub format: SearchFormat,
}

impl PawprintConfig {
    /// Attempts to load configuration from `pawprint.toml` in the given directory.
    pub fn load_from_dir(dir: &Path) -> Option<Self> {
        std::fs::read_to_string(dir.join(CONFIG_FILE))
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
    }
}

impl AuditConfig {
    /// Validates the configuration, ensuring the project root exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.project_root.is_dir() {
            anyhow::bail!("Project root does not exist: {:?}", self.project_root);
        }
        Ok(())
    }

    pub fn source_root(&self) -> PathBuf {
        self.project_root.join(&self.source_dir)
    }

    pub fn app_root(&self) -> PathBuf {
        self.source_root().join(&self.app_dir)
    }

    pub fn public_root(&self) -> PathBuf {
        self.project_root.join(&self.public_dir)
    }

    pub fn report_file(&self) -> PathBuf {
        self.project_root.join(&self.report_path)
    }

    pub fn candidates_file(&self) -> PathBuf {
        self.project_root.join(&self.candidates_path)
    }

    pub fn plan_file(&self) -> PathBuf {
        self.project_root.join(&self.plan_path)
    }

    /// Same configuration rooted somewhere else (used by tests and `--root`).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            source_dir: PathBuf::from("src"),
            app_dir: PathBuf::from("app"),
            public_dir: PathBuf::from("public"),
            alias_prefix: "@/".to_string(),
            code_extensions: strings(&["ts", "tsx", "js", "jsx", "mjs", "cjs"]),
            skip_dirs: strings(&[
                "node_modules",
                ".next",
                ".git",
                "dist",
                "build",
                "out",
                "coverage",
                ".turbo",
                ".vercel",
            ]),
            route_conventions: strings(&[
                // Routing
                "page",
                "layout",
                "route",
                "loading",
                "error",
                "not-found",
                "template",
                "default",
                "global-error",
                // Metadata files
                "sitemap",
                "robots",
                "manifest",
                "opengraph-image",
                "twitter-image",
                "icon",
                "apple-icon",
            ]),
            config_files: strings(&[
                "next.config.js",
                "next.config.mjs",
                "next.config.ts",
                "tailwind.config.js",
                "tailwind.config.ts",
                "postcss.config.js",
                "postcss.config.mjs",
                "next-sitemap.config.js",
                "src/middleware.ts",
                "src/instrumentation.ts",
            ]),
            image_extensions: strings(&["png", "jpg", "jpeg", "webp", "avif", "gif", "svg", "ico"]),
            report_path: PathBuf::from("usage-report.md"),
            candidates_path: PathBuf::from("usage-candidates.json"),
            plan_path: PathBuf::from("deletion-plan.md"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let config = AuditConfig::default().with_root("non_existent_path_xyz_123");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "[audit]\nsource_dir = \"app-src\"\n\n[search]\ncatalog = \"docs.json\"\nformat = \"html\"\n",
        )?;

        let config = PawprintConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.audit.source_dir, PathBuf::from("app-src"));
        assert_eq!(config.audit.alias_prefix, "@/");
        assert_eq!(config.audit.code_extensions[0], "ts");
        assert_eq!(config.search.catalog, Some(PathBuf::from("docs.json")));
        assert_eq!(config.search.format, SearchFormat::Html);
        Ok(())
    }

    #[test]
    fn test_missing_config_file() {
        let temp = TempDir::new().unwrap();
        assert!(PawprintConfig::load_from_dir(temp.path()).is_none());
    }
}
