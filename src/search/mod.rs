//! Static site search
//!
//! Keyword scoring over a small, fixed catalog of pages. The catalog is loaded once
//! and handed to [`search`]; there is no global document list.

pub mod highlight;
pub mod render;
pub mod score;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub use highlight::{Highlighter, Segment, highlight};
pub use score::{Query, ScoredDocument, SearchOutcome, score, search, tokenize};

/// Catalog bundled with the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// A searchable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Site-relative URL, unique within a catalog
    pub url: String,
    pub title: String,
    pub blurb: String,
    /// Keywords and synonyms
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ordered, immutable list of documents. Order is the tie-breaker for equal scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Catalog {
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(doc.url.as_str()) {
                anyhow::bail!("Duplicate catalog URL: {}", doc.url);
            }
        }
        Ok(Self { documents })
    }

    /// The catalog shipped with pawprint.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CATALOG).context("Bundled catalog is invalid")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: Catalog = toml::from_str(content)?;
        Self::new(raw.documents)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Catalog = serde_json::from_str(content)?;
        Self::new(raw.documents)
    }

    /// Loads a `.json` or `.toml` catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        };
        parsed.with_context(|| format!("Failed to parse catalog: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.documents.iter().any(|d| d.url == "/services/dog-walking"));
    }

    #[test]
    fn test_duplicate_urls_rejected() {
        let json = r#"{"documents": [
            {"url": "/a", "title": "A", "blurb": "", "tags": []},
            {"url": "/a", "title": "A again", "blurb": ""}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }
}
