//! Route listing derived from the app directory's file conventions

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::fs::walk_source_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteKind {
    /// `page.*`: renders HTML
    Page,
    /// `route.*`: request handler (API, feeds, sitemap endpoints)
    Handler,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub url: String,
    pub kind: RouteKind,
    /// Contains a `[param]` segment
    pub dynamic: bool,
    pub file: PathBuf,
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RouteKind::Page => "page",
            RouteKind::Handler => "route",
        };
        write!(
            f,
            "{:<48} {:<6} {}",
            self.url,
            kind,
            if self.dynamic { "dynamic" } else { "static" }
        )
    }
}

/// URL for a route file, or `None` when the file is not routable (private folder).
pub fn url_for(file: &Path, app_root: &Path) -> Option<String> {
    let relative = file.strip_prefix(app_root).ok()?;
    let parent = relative.parent().unwrap_or(Path::new(""));

    let mut segments = Vec::new();
    for component in parent.components() {
        let Component::Normal(name) = component else {
            continue;
        };
        let name = name.to_string_lossy();
        if name.starts_with('_') {
            return None;
        }
        // Route groups and parallel slots do not appear in the URL.
        if (name.starts_with('(') && name.ends_with(')')) || name.starts_with('@') {
            continue;
        }
        segments.push(name.into_owned());
    }

    Some(format!("/{}", segments.join("/")))
}

/// Every page and route handler under `app_root`, sorted by URL.
pub fn list_routes(app_root: &Path, skip_dirs: &[String], extensions: &[String]) -> Result<Vec<RouteEntry>> {
    if !app_root.is_dir() {
        anyhow::bail!("App directory does not exist: {:?}", app_root);
    }

    let mut routes: Vec<RouteEntry> = walk_source_files(app_root, skip_dirs, extensions)?
        .into_iter()
        .filter_map(|file| {
            let kind = match file.file_stem().and_then(|s| s.to_str()) {
                Some("page") => RouteKind::Page,
                Some("route") => RouteKind::Handler,
                _ => return None,
            };
            let url = url_for(&file, app_root)?;
            Some(RouteEntry {
                dynamic: url.contains('['),
                url,
                kind,
                file,
            })
        })
        .collect();

    routes.sort_by(|a, b| a.url.cmp(&b.url));
    Ok(routes)
}
