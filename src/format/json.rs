//! Machine-readable candidates file shared by `audit` and `prune`

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::audit::AuditReport;
use crate::fs::display_relative;

/// `{ "safeCandidates": [...], "risky": [...] }`, paths relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidates {
    pub safe_candidates: Vec<String>,
    #[serde(default)]
    pub risky: Vec<String>,
}

impl Candidates {
    pub fn from_report(report: &AuditReport) -> Self {
        let relative = |paths: &[std::path::PathBuf]| -> Vec<String> {
            paths
                .iter()
                .map(|p| display_relative(p, &report.project_root))
                .collect()
        };
        Self {
            safe_candidates: relative(&report.safe),
            risky: relative(&report.risky),
        }
    }
}

pub fn write_candidates(output: &mut dyn Write, candidates: &Candidates) -> Result<()> {
    let json = serde_json::to_string_pretty(candidates)?;
    writeln!(output, "{}", json)?;
    Ok(())
}
