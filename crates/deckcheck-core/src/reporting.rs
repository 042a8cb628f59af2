use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::verdict::{VerificationResult, Violation};

/// Schema version written into every JSON report.
pub const REPORT_SCHEMA_VERSION: &str = "1";

/// Render the plain-text report printed at the end of a run.
///
/// ```text
/// Engine: reference
/// Games: 11 played, 10 passed, 1 failed
/// Result: NON-COMPLIANT (1 violation)
///
/// --- [Game 10] Move legality: engine silently accepted an illegal decision
/// ```
pub fn format_report(result: &VerificationResult, engine_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Engine: {engine_name}\n"));
    out.push_str(&format!(
        "Games: {} played, {} passed",
        result.games_attempted, result.games_passed
    ));
    if result.games_attempted != result.games_passed {
        out.push_str(&format!(", {} failed", result.games_failed()));
    }
    out.push('\n');

    if result.is_compliant() {
        out.push_str("Result: FULLY COMPLIANT\n");
    } else {
        let n = result.violations.len();
        let plural = if n == 1 { "" } else { "s" };
        out.push_str(&format!("Result: NON-COMPLIANT ({n} violation{plural})\n\n"));
        for v in &result.violations {
            out.push_str(&format!("--- {v}\n"));
        }
    }
    out
}

/// Summary section of the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationSummaryArtifact {
    pub games_attempted: usize,
    pub games_passed: usize,
    pub games_failed: usize,
    pub violation_count: usize,
    pub compliant: bool,
}

/// Machine-readable report written with `--output`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub engine: String,
    pub seed: u64,
    pub summary: VerificationSummaryArtifact,
    pub violations: Vec<Violation>,
}

impl VerificationArtifact {
    pub fn new(engine: &str, seed: u64, result: &VerificationResult) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            run_id: Uuid::new_v4(),
            engine: engine.to_string(),
            seed,
            summary: VerificationSummaryArtifact {
                games_attempted: result.games_attempted,
                games_passed: result.games_passed,
                games_failed: result.games_failed(),
                violation_count: result.violations.len(),
                compliant: result.is_compliant(),
            },
            violations: result.violations.clone(),
        }
    }
}

/// Write the JSON report in pretty format.
pub fn write_report_json(path: &Path, artifact: &VerificationArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize verification report")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Read a JSON report back.
pub fn read_report_json(path: &Path) -> Result<VerificationArtifact> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    serde_json::from_str(&raw).context("parse verification report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::CheckName;

    #[test]
    fn test_compliant_report() {
        let result = VerificationResult {
            games_attempted: 11,
            games_passed: 11,
            violations: vec![],
        };
        assert_eq!(
            format_report(&result, "reference"),
            "Engine: reference\nGames: 11 played, 11 passed\nResult: FULLY COMPLIANT\n"
        );
    }

    #[test]
    fn test_non_compliant_report_lists_violations() {
        let result = VerificationResult {
            games_attempted: 3,
            games_passed: 1,
            violations: vec![
                Violation::new(CheckName::InitialSupply, 0, "Bug: expected 20 but found 19"),
                Violation::new(CheckName::MoveLegality, 2, "engine silently accepted an illegal decision"),
            ],
        };
        let report = format_report(&result, "buggy");
        assert!(report.contains("Games: 3 played, 1 passed, 2 failed\n"));
        assert!(report.contains("Result: NON-COMPLIANT (2 violations)\n\n"));
        assert!(report.contains("--- [Game 0] Initial supply: Bug: expected 20 but found 19\n"));
        assert!(report.ends_with("illegal decision\n"));
    }

    #[test]
    fn test_single_violation_is_singular() {
        let result = VerificationResult {
            games_attempted: 1,
            games_passed: 0,
            violations: vec![Violation::new(CheckName::MoveLegality, 0, "x")],
        };
        assert!(format_report(&result, "e").contains("(1 violation)\n"));
    }

    #[test]
    fn test_artifact_round_trip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let result = VerificationResult {
            games_attempted: 2,
            games_passed: 1,
            violations: vec![Violation::new(CheckName::EndTurnEvent, 0, "none").with_turn(3)],
        };
        let artifact = VerificationArtifact::new("reference", 42, &result);
        write_report_json(&path, &artifact).expect("write");

        let loaded = read_report_json(&path).expect("read");
        assert_eq!(loaded, artifact);
        assert_eq!(loaded.summary.games_failed, 1);
        assert!(!loaded.summary.compliant);
    }
}
