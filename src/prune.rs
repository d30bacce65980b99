//! Deletion step for audit candidates.
//!
//! Reads the candidates file written by `audit`, always writes a plan, and only removes
//! files that are listed as safe and live under the source directory. Dry-run never
//! touches the filesystem beyond the plan.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};

use crate::format::json::Candidates;
use crate::fs::{display_relative, normalize_path};

#[derive(Debug, Error)]
pub enum PruneError {
    #[error("candidates file not found: {0} (run `pawprint audit` first)")]
    MissingCandidates(PathBuf),
    #[error("candidates file {path} is not valid JSON: {source}")]
    MalformedCandidates {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to delete {0}: outside the source directory")]
    OutsideSource(PathBuf),
}

#[derive(Debug, Clone)]
pub struct PruneOptions {
    pub project_root: PathBuf,
    pub source_dir: PathBuf,
    pub candidates_path: PathBuf,
    pub plan_path: PathBuf,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Delete,
    SkipOutsideSource,
    SkipMissing,
    SkipRisky,
}

impl PlanAction {
    pub fn label(&self) -> &'static str {
        match self {
            PlanAction::Delete => "delete",
            PlanAction::SkipOutsideSource => "skip (outside source dir)",
            PlanAction::SkipMissing => "skip (not found)",
            PlanAction::SkipRisky => "skip (dynamic import/require)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Path as listed in the candidates file
    pub listed: String,
    /// Absolute, normalised location
    pub path: PathBuf,
    pub action: PlanAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub dry_run: bool,
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Reads and parses the candidates file. Nothing is mutated before this succeeds.
pub fn load_candidates(path: &Path) -> Result<Candidates, PruneError> {
    let content =
        fs::read_to_string(path).map_err(|_| PruneError::MissingCandidates(path.to_path_buf()))?;
    serde_json::from_str(&content).map_err(|source| PruneError::MalformedCandidates {
        path: path.to_path_buf(),
        source,
    })
}

fn absolute(listed: &str, project_root: &Path) -> PathBuf {
    let listed = Path::new(listed);
    if listed.is_absolute() {
        normalize_path(listed)
    } else {
        normalize_path(&project_root.join(listed))
    }
}

/// Resolves symlinks so a linked directory cannot smuggle a path out of the source root.
fn canonical_under(path: &Path, canonical_root: &Path) -> Option<PathBuf> {
    let canonical = path.canonicalize().ok()?;
    (canonical.starts_with(canonical_root) && canonical != canonical_root).then_some(canonical)
}

/// Decides what happens to every listed path. A path listed as both safe and risky is
/// treated as risky.
pub fn plan(candidates: &Candidates, project_root: &Path, source_root: &Path) -> Vec<PlanEntry> {
    let source_root = normalize_path(source_root);
    let canonical_root = source_root
        .canonicalize()
        .unwrap_or_else(|_| source_root.clone());
    let risky: HashSet<PathBuf> = candidates
        .risky
        .iter()
        .map(|listed| absolute(listed, project_root))
        .collect();

    let mut entries: Vec<PlanEntry> = candidates
        .safe_candidates
        .iter()
        .map(|listed| {
            let path = absolute(listed, project_root);
            let action = if !path.starts_with(&source_root) || path == source_root {
                PlanAction::SkipOutsideSource
            } else if risky.contains(&path) {
                PlanAction::SkipRisky
            } else if !path.exists() {
                PlanAction::SkipMissing
            } else if canonical_under(&path, &canonical_root).is_none() {
                PlanAction::SkipOutsideSource
            } else if !path.is_file() {
                PlanAction::SkipMissing
            } else {
                PlanAction::Delete
            };
            PlanEntry {
                listed: listed.clone(),
                path,
                action,
            }
        })
        .collect();

    let listed_safe: HashSet<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
    entries.extend(
        candidates
            .risky
            .iter()
            .map(|listed| (listed, absolute(listed, project_root)))
            .filter(|(_, path)| !listed_safe.contains(path))
            .map(|(listed, path)| PlanEntry {
                listed: listed.clone(),
                path,
                action: PlanAction::SkipRisky,
            }),
    );
    entries
}

/// Carries out `Delete` entries unless `dry_run` is set.
///
/// The source-root guard is checked again on the canonical path right before each
/// removal.
pub fn execute(entries: &[PlanEntry], source_root: &Path, dry_run: bool) -> PruneSummary {
    let mut summary = PruneSummary {
        dry_run,
        ..Default::default()
    };
    if dry_run {
        return summary;
    }

    let source_root = normalize_path(source_root);
    let canonical_root = source_root
        .canonicalize()
        .unwrap_or_else(|_| source_root.clone());
    for entry in entries.iter().filter(|e| e.action == PlanAction::Delete) {
        let guarded = if entry.path.starts_with(&source_root) {
            canonical_under(&entry.path, &canonical_root)
        } else {
            None
        };
        let Some(target) = guarded else {
            let err = PruneError::OutsideSource(entry.path.clone());
            warn!("{}", err);
            summary.failed.push((entry.path.clone(), err.to_string()));
            continue;
        };
        match fs::remove_file(&target) {
            Ok(()) => {
                info!("Deleted {:?}", entry.path);
                summary.deleted.push(entry.path.clone());
            }
            Err(e) => {
                warn!("Failed to delete {:?}: {}", entry.path, e);
                summary.failed.push((entry.path.clone(), e.to_string()));
            }
        }
    }
    summary
}

/// Full prune step: load, plan, write the plan, then delete when allowed.
pub fn run_prune(options: &PruneOptions) -> Result<PruneSummary> {
    let candidates = load_candidates(&options.candidates_path)?;
    let source_root = options.project_root.join(&options.source_dir);
    let entries = plan(&candidates, &options.project_root, &source_root);

    let mut file = fs::File::create(&options.plan_path)
        .with_context(|| format!("Failed to create deletion plan: {:?}", options.plan_path))?;
    crate::format::markdown::write_deletion_plan(
        &mut file,
        &entries,
        &options.project_root,
        options.dry_run,
    )?;
    info!(
        "Deletion plan written to {}",
        display_relative(&options.plan_path, &options.project_root)
    );

    Ok(execute(&entries, &source_root, options.dry_run))
}
