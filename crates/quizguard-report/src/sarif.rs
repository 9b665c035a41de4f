//! SARIF (Static Analysis Results Interchange Format) output.
//!
//! Generates SARIF 2.1.0 documents so integrity issues can be surfaced by
//! code-scanning tools alongside the record file they describe.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use quizguard_core::model::{Issue, IssueKind, Severity};
use quizguard_core::report::IntegrityReport;

/// Artifact URI used for result locations.
pub const DEFAULT_ARTIFACT: &str = "records.json";

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

fn result(issue: &Issue, artifact: &str) -> serde_json::Value {
    json!({
        "ruleId": issue.kind.as_str(),
        "level": level(issue.severity),
        "message": { "text": issue.message },
        "locations": [{
            "physicalLocation": {
                "artifactLocation": {
                    "uri": format!("{artifact}#question-{}", issue.record_index)
                }
            }
        }]
    })
}

/// Generate a SARIF 2.1.0 JSON document from an integrity report.
pub fn generate_sarif(report: &IntegrityReport, artifact: &str) -> serde_json::Value {
    let rules: Vec<_> = IssueKind::ALL
        .iter()
        .map(|kind| {
            json!({
                "id": kind.as_str(),
                "name": kind.as_str(),
                "shortDescription": { "text": kind.describe() },
            })
        })
        .collect();

    let results: Vec<_> = report
        .validation
        .issues
        .iter()
        .chain(&report.validation.warnings)
        .map(|issue| result(issue, artifact))
        .collect();

    json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "quizguard",
                    "version": env!("CARGO_PKG_VERSION"),
                    "informationUri": "https://github.com/MysterionRise/quizguard",
                    "rules": rules
                }
            },
            "results": results,
            "properties": {
                "checksum": report.checksum,
                "passed": report.validation.passed,
                "totalQuestions": report.total_questions
            }
        }]
    })
}

/// Write a SARIF report to a file.
pub fn write_sarif_report(report: &IntegrityReport, artifact: &str, path: &Path) -> Result<()> {
    let sarif = generate_sarif(report, artifact);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&sarif)?;
    std::fs::write(path, json)?;
    Ok(())
}
