//! Usage audit: finds source files nothing reaches.
//!
//! The pipeline is discover → scan (parallel, per file) → graph → seeds →
//! reachability → retention overlay → candidates. A file that cannot be read simply
//! contributes no edges; the audit never aborts on one bad file.

pub mod assets;
pub mod conventions;
pub mod graph;
pub mod imports;
pub mod resolve;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::fs::walk_source_files;

pub use assets::{AssetScanner, MissingAsset};
pub use graph::DependencyGraph;
pub use resolve::Resolver;

/// What a single file contributed to the audit.
#[derive(Debug, Clone, Default)]
pub struct FileScan {
    pub path: PathBuf,
    /// Resolved, in-project import targets
    pub imports: Vec<PathBuf>,
    /// Has a non-literal `import(...)` / `require(...)`
    pub dynamic: bool,
    /// Root-relative asset references
    pub assets: Vec<String>,
    pub readable: bool,
}

/// Result of one audit run.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub project_root: PathBuf,
    pub files: Vec<PathBuf>,
    pub graph: DependencyGraph,
    pub seeds: Vec<PathBuf>,
    pub used: Vec<PathBuf>,
    pub retained: Vec<PathBuf>,
    pub safe: Vec<PathBuf>,
    pub risky: Vec<PathBuf>,
    pub missing_assets: Vec<MissingAsset>,
    pub unreadable: usize,
    pub generated_at: String,
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Usage Audit")?;
        writeln!(f, "===========")?;
        writeln!(f, "Files scanned:    {}", self.files.len())?;
        writeln!(f, "Import edges:     {}", self.graph.edge_count())?;
        writeln!(f, "Seed files:       {}", self.seeds.len())?;
        writeln!(f, "Used files:       {}", self.used.len())?;
        writeln!(f, "Safe candidates:  {}", self.safe.len())?;
        writeln!(f, "Risky candidates: {}", self.risky.len())?;
        writeln!(f, "Missing assets:   {}", self.missing_assets.len())?;
        if self.unreadable > 0 {
            writeln!(f, "Unreadable files: {} (skipped)", self.unreadable)?;
        }
        Ok(())
    }
}

/// Reads one file and extracts what the audit needs from it.
pub fn scan_file(path: &Path, resolver: &Resolver, assets: &AssetScanner) -> FileScan {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!("Skipping unreadable file {:?}: {}", path, e);
            return FileScan {
                path: path.to_path_buf(),
                ..Default::default()
            };
        }
    };

    let resolved: Vec<PathBuf> = imports::extract_imports(&content)
        .iter()
        .filter_map(|spec| resolver.resolve(spec, path))
        .collect();

    FileScan {
        path: path.to_path_buf(),
        imports: resolved,
        dynamic: imports::has_dynamic_usage(&content),
        assets: assets.references(&content),
        readable: true,
    }
}

/// Builds the import graph from per-file scans. Every scanned file is a node.
pub fn build_graph(scans: &[FileScan]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for scan in scans {
        graph.add_node(scan.path.clone());
        for target in &scan.imports {
            graph.add_edge(scan.path.clone(), target.clone());
        }
    }
    graph
}

/// Runs the full audit over the configured project.
pub fn run_audit(config: &AuditConfig, show_progress: bool) -> Result<AuditReport> {
    config.validate()?;

    let project_root = config
        .project_root
        .canonicalize()
        .with_context(|| format!("Failed to find project root: {:?}", config.project_root))?;
    let rooted = config.clone().with_root(project_root.clone());
    let source_root = rooted.source_root();
    if !source_root.is_dir() {
        anyhow::bail!("Source directory does not exist: {:?}", source_root);
    }
    let app_root = rooted.app_root();

    let files = walk_source_files(&source_root, &config.skip_dirs, &config.code_extensions)?;
    info!("Discovered {} source files under {:?}", files.len(), source_root);

    let resolver = Resolver::new(
        &project_root,
        &config.source_dir,
        &config.alias_prefix,
        &config.code_extensions,
    );
    let asset_scanner = AssetScanner::new(&config.image_extensions)?;

    let progress = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let scans: Vec<FileScan> = files
        .par_iter()
        .map(|path| {
            let scan = scan_file(path, &resolver, &asset_scanner);
            progress.inc(1);
            scan
        })
        .collect();
    progress.finish_and_clear();

    let graph = build_graph(&scans);

    let seeds = conventions::seed_files(
        &files,
        &app_root,
        &config.route_conventions,
        &config.code_extensions,
    );
    let used: HashSet<PathBuf> = graph.reachable_from(&seeds);
    let retained = conventions::retained_files(
        &files,
        &project_root,
        &app_root,
        &config.route_conventions,
        &config.config_files,
    );

    let mut safe = Vec::new();
    let mut risky = Vec::new();
    for scan in &scans {
        if used.contains(&scan.path) || retained.contains(&scan.path) {
            continue;
        }
        if scan.dynamic {
            risky.push(scan.path.clone());
        } else {
            safe.push(scan.path.clone());
        }
    }

    let public_root = rooted.public_root();
    let missing_assets: Vec<MissingAsset> = scans
        .iter()
        .flat_map(|scan| assets::missing_assets(&public_root, &scan.path, &scan.assets))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let unreadable = scans.iter().filter(|s| !s.readable).count();
    let used: BTreeSet<PathBuf> = used.into_iter().collect();

    let report = AuditReport {
        project_root,
        files,
        graph,
        seeds: seeds.into_iter().collect(),
        used: used.into_iter().collect(),
        retained: retained.into_iter().collect(),
        safe,
        risky,
        missing_assets,
        unreadable,
        generated_at: chrono::Utc::now().to_rfc3339(),
    };
    info!(
        "Audit complete: {} safe, {} risky candidates",
        report.safe.len(),
        report.risky.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_unreadable_file_contributes_nothing() {
        let root = Path::new("/definitely/not/here");
        let exts = vec!["ts".to_string()];
        let resolver = Resolver::new(root, Path::new("src"), "@/", &exts);
        let scanner = AssetScanner::new(&["png".to_string()]).unwrap();

        let scan = scan_file(&root.join("src/missing.ts"), &resolver, &scanner);
        assert!(!scan.readable);
        assert!(scan.imports.is_empty());
        assert!(!scan.dynamic);
    }

    #[test]
    fn test_sibling_import_yields_one_edge() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path().canonicalize()?;
        let lib = root.join("src/lib");
        fs::create_dir_all(&lib)?;
        fs::write(
            lib.join("a.ts"),
            "import { b } from './b';\nexport { b } from \"./b\";\nimport { gone } from './gone';\n",
        )?;
        fs::write(lib.join("b.ts"), "export const b = 1;")?;

        let exts = vec!["ts".to_string()];
        let resolver = Resolver::new(&root, Path::new("src"), "@/", &exts);
        let scanner = AssetScanner::new(&["png".to_string()])?;
        let scans = vec![
            scan_file(&lib.join("a.ts"), &resolver, &scanner),
            scan_file(&lib.join("b.ts"), &resolver, &scanner),
        ];
        let graph = build_graph(&scans);

        let deps: Vec<&PathBuf> = graph.dependencies_of(&lib.join("a.ts")).collect();
        assert_eq!(deps, vec![&lib.join("b.ts")]);
        assert_eq!(graph.edge_count(), 1);
        Ok(())
    }
}
