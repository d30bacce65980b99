//! Files the framework loads by name rather than by import.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// True when `path` sits under `app_root` and its stem is a route convention
/// (`page.tsx`, `not-found.js`, `sitemap.ts`, ...).
pub fn is_route_convention(path: &Path, app_root: &Path, conventions: &[String]) -> bool {
    if !path.starts_with(app_root) {
        return false;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| conventions.iter().any(|c| c == stem))
}

/// Entry points of the reachability walk: every route-convention file plus the root
/// layout when there is one.
pub fn seed_files(
    files: &[PathBuf],
    app_root: &Path,
    conventions: &[String],
    extensions: &[String],
) -> BTreeSet<PathBuf> {
    let mut seeds: BTreeSet<PathBuf> = files
        .iter()
        .filter(|f| is_route_convention(f, app_root, conventions))
        .cloned()
        .collect();

    if let Some(layout) = root_layout(app_root, extensions) {
        seeds.insert(layout);
    }
    seeds
}

/// `<app>/layout.<ext>`, first extension that exists.
pub fn root_layout(app_root: &Path, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| app_root.join(format!("layout.{}", ext)))
        .find(|candidate| candidate.is_file())
}

/// Files that are never deletion candidates, whatever the graph says: route
/// conventions and the project configuration files that exist on disk.
pub fn retained_files(
    files: &[PathBuf],
    project_root: &Path,
    app_root: &Path,
    conventions: &[String],
    config_files: &[String],
) -> BTreeSet<PathBuf> {
    let mut retained: BTreeSet<PathBuf> = files
        .iter()
        .filter(|f| is_route_convention(f, app_root, conventions))
        .cloned()
        .collect();

    retained.extend(
        config_files
            .iter()
            .map(|name| project_root.join(name))
            .filter(|path| path.is_file()),
    );
    retained
}
