use crate::audit::{AuditReport, run_audit};
use crate::config::{AuditConfig, SearchFormat};
use crate::format::write_audit_outputs;
use crate::fs::display_relative;
use crate::prune::{PruneOptions, PruneSummary, run_prune};
use crate::routes::{RouteEntry, list_routes};
use crate::search::render::{render_html, render_json, render_plain};
use crate::search::{Catalog, search};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Searches `catalog` and renders the outcome in the requested format.
pub fn run_search(catalog: &Catalog, raw_query: &str, format: SearchFormat) -> Result<String> {
    let outcome = search(catalog, raw_query);
    match format {
        SearchFormat::Plain => Ok(render_plain(&outcome, raw_query)),
        SearchFormat::Html => Ok(render_html(&outcome, raw_query)),
        SearchFormat::Json => render_json(&outcome, raw_query),
    }
}

/// Loads the configured catalog, or the bundled one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::load(p),
        None => Catalog::builtin(),
    }
}

/// Runs the usage audit and writes the markdown report and candidates JSON.
///
/// `report_path` / `json_path` override the configured locations.
pub fn run_audit_command(
    config: &AuditConfig,
    report_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
    show_progress: bool,
) -> Result<AuditReport> {
    let report = run_audit(config, show_progress)?;

    let report_path = report_path.unwrap_or_else(|| config.report_file());
    let json_path = json_path.unwrap_or_else(|| config.candidates_file());
    write_audit_outputs(&report, &report_path, &json_path)?;

    info!(
        "Report written to {} and {}",
        display_relative(&report_path, &config.project_root),
        display_relative(&json_path, &config.project_root)
    );
    Ok(report)
}

/// Dry-run is forced by the flag or by a non-interactive stdin.
pub fn effective_dry_run(flag: bool, interactive: bool) -> bool {
    flag || !interactive
}

pub fn run_prune_command(
    config: &AuditConfig,
    candidates_path: Option<PathBuf>,
    plan_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<PruneSummary> {
    let options = PruneOptions {
        project_root: config.project_root.clone(),
        source_dir: config.source_dir.clone(),
        candidates_path: candidates_path.unwrap_or_else(|| config.candidates_file()),
        plan_path: plan_path.unwrap_or_else(|| config.plan_file()),
        dry_run,
    };
    run_prune(&options)
}

pub fn run_routes_command(config: &AuditConfig) -> Result<Vec<RouteEntry>> {
    list_routes(&config.app_root(), &config.skip_dirs, &config.code_extensions)
}
