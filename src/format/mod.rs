//! Report writers for pawprint

pub mod json;
pub mod markdown;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::audit::AuditReport;

/// Writes the markdown report and the candidates JSON side by side.
pub fn write_audit_outputs(report: &AuditReport, report_path: &Path, json_path: &Path) -> Result<()> {
    let file = File::create(report_path)
        .with_context(|| format!("Failed to create report: {:?}", report_path))?;
    let mut writer = BufWriter::new(file);
    markdown::write_audit_report(&mut writer, report)?;
    writer.flush()?;

    let file = File::create(json_path)
        .with_context(|| format!("Failed to create candidates file: {:?}", json_path))?;
    let mut writer = BufWriter::new(file);
    json::write_candidates(&mut writer, &json::Candidates::from_report(report))?;
    writer.flush()?;

    Ok(())
}
