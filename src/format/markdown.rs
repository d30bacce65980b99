//! Markdown reports for the usage audit and the deletion plan

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::audit::AuditReport;
use crate::fs::display_relative;
use crate::prune::{PlanAction, PlanEntry};

fn write_path_table(
    output: &mut dyn Write,
    title: &str,
    paths: &[PathBuf],
    root: &Path,
) -> Result<()> {
    writeln!(output, "## {} ({})", title, paths.len())?;
    writeln!(output)?;
    if paths.is_empty() {
        writeln!(output, "_None_")?;
        writeln!(output)?;
        return Ok(());
    }
    writeln!(output, "| # | File |")?;
    writeln!(output, "|---|------|")?;
    for (i, path) in paths.iter().enumerate() {
        writeln!(output, "| {} | `{}` |", i + 1, display_relative(path, root))?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn write_audit_report(output: &mut dyn Write, report: &AuditReport) -> Result<()> {
    let root = &report.project_root;

    writeln!(output, "# Usage Audit")?;
    writeln!(output)?;
    writeln!(output, "> Generated {}", report.generated_at)?;
    writeln!(output)?;
    writeln!(output, "| Metric | Count |")?;
    writeln!(output, "|--------|-------|")?;
    writeln!(output, "| Files scanned | {} |", report.files.len())?;
    writeln!(output, "| Import edges | {} |", report.graph.edge_count())?;
    writeln!(output, "| Seed files | {} |", report.seeds.len())?;
    writeln!(output, "| Used files | {} |", report.used.len())?;
    writeln!(output, "| Safe candidates | {} |", report.safe.len())?;
    writeln!(output, "| Risky candidates | {} |", report.risky.len())?;
    writeln!(output, "| Missing assets | {} |", report.missing_assets.len())?;
    writeln!(output)?;

    write_path_table(output, "Seed Files", &report.seeds, root)?;
    write_path_table(output, "Used Files", &report.used, root)?;
    write_path_table(output, "Safe Candidates", &report.safe, root)?;

    write_path_table(output, "Risky Candidates", &report.risky, root)?;
    if !report.risky.is_empty() {
        writeln!(
            output,
            "Risky files contain a dynamic `import()` or `require()` with a non-literal \
             argument. Check them by hand; `pawprint prune` never deletes them."
        )?;
        writeln!(output)?;
    }

    writeln!(output, "## Missing Assets ({})", report.missing_assets.len())?;
    writeln!(output)?;
    if report.missing_assets.is_empty() {
        writeln!(output, "_None_")?;
    } else {
        writeln!(output, "| Asset | Referenced by |")?;
        writeln!(output, "|-------|---------------|")?;
        for missing in &report.missing_assets {
            writeln!(
                output,
                "| `{}` | `{}` |",
                missing.asset,
                display_relative(&missing.referenced_by, root)
            )?;
        }
    }
    writeln!(output)?;
    Ok(())
}

pub fn write_deletion_plan(
    output: &mut dyn Write,
    entries: &[PlanEntry],
    project_root: &Path,
    dry_run: bool,
) -> Result<()> {
    let to_delete = entries
        .iter()
        .filter(|e| e.action == PlanAction::Delete)
        .count();

    writeln!(output, "# Deletion Plan")?;
    writeln!(output)?;
    writeln!(output, "> Generated {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(
        output,
        "> Mode: {}",
        if dry_run {
            "dry run (no files removed)"
        } else {
            "live"
        }
    )?;
    writeln!(output)?;
    if dry_run {
        writeln!(
            output,
            "{} of {} listed files would be deleted (dry run, nothing removed).",
            to_delete,
            entries.len()
        )?;
    } else {
        writeln!(
            output,
            "{} of {} listed files will be deleted.",
            to_delete,
            entries.len()
        )?;
    }
    writeln!(output)?;

    if entries.is_empty() {
        writeln!(output, "_Nothing listed._")?;
        return Ok(());
    }

    writeln!(output, "| File | Action |")?;
    writeln!(output, "|------|--------|")?;
    for entry in entries {
        let shown = if entry.path.starts_with(project_root) {
            display_relative(&entry.path, project_root)
        } else {
            entry.listed.clone()
        };
        let action = if dry_run && entry.action == PlanAction::Delete {
            "would delete"
        } else {
            entry.action.label()
        };
        writeln!(output, "| `{}` | {} |", shown, action)?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::DependencyGraph;

    fn report() -> AuditReport {
        let root = PathBuf::from("/site");
        AuditReport {
            project_root: root.clone(),
            files: vec![root.join("src/app/page.tsx"), root.join("src/components/Old.tsx")],
            graph: DependencyGraph::new(),
            seeds: vec![root.join("src/app/page.tsx")],
            used: vec![root.join("src/app/page.tsx")],
            retained: vec![root.join("src/app/page.tsx")],
            safe: vec![root.join("src/components/Old.tsx")],
            risky: vec![],
            missing_assets: vec![],
            unreadable: 0,
            generated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_audit_report_tables() {
        let mut output = Vec::new();
        write_audit_report(&mut output, &report()).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("## Seed Files (1)"));
        assert!(result.contains("| 1 | `src/components/Old.tsx` |"));
        assert!(result.contains("## Risky Candidates (0)"));
        assert!(result.contains("## Missing Assets (0)"));
        assert!(result.contains("_None_"));
    }

    #[test]
    fn test_dry_run_plan_wording() {
        let entries = vec![PlanEntry {
            listed: "src/components/Old.tsx".to_string(),
            path: PathBuf::from("/site/src/components/Old.tsx"),
            action: PlanAction::Delete,
        }];
        let mut output = Vec::new();
        write_deletion_plan(&mut output, &entries, Path::new("/site"), true).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("1 of 1 listed files would be deleted (dry run, nothing removed)."));
        assert!(result.contains("| `src/components/Old.tsx` | would delete |"));
    }
}
