//! Integrity report assembly with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{QuizguardConfig, ReportConfig};
use crate::model::{IssueKind, ValidationReport};
use crate::normalizer::NormalizedRecord;
use crate::validator::Validator;

/// Advice attached when the collection is smaller than expected.
pub const LOW_COUNT_RECOMMENDATION: &str =
    "low question count, check the source document for missed questions";

/// Advice attached when any record has fewer options than recommended.
pub const INCOMPLETE_OPTIONS_RECOMMENDATION: &str =
    "some questions have incomplete options but will still be displayed";

/// A complete, reviewable integrity report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub timestamp: DateTime<Utc>,
    pub original_text_length: usize,
    pub total_questions: usize,
    /// Collection checksum, identical to `validation.checksum`.
    pub checksum: String,
    pub validation: ValidationReport,
    /// Advisory text only.
    pub recommendations: Vec<String>,
}

impl IntegrityReport {
    /// Wrap a validation report with recommendations and a timestamp.
    pub fn from_validation(
        validation: ValidationReport,
        config: &ReportConfig,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut recommendations = Vec::new();
        if validation.extracted_count < config.min_expected_questions {
            recommendations.push(LOW_COUNT_RECOMMENDATION.to_string());
        }
        if validation.has_warning(IssueKind::IncompleteOptions) {
            recommendations.push(INCOMPLETE_OPTIONS_RECOMMENDATION.to_string());
        }

        Self {
            id: Uuid::new_v4(),
            timestamp,
            original_text_length: validation.original_length,
            total_questions: validation.extracted_count,
            checksum: validation.checksum.clone(),
            validation,
            recommendations,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: IntegrityReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Validate `records` in place and build the full integrity report.
pub fn create_integrity_report(
    records: &mut [NormalizedRecord],
    source_text: Option<&str>,
    config: &QuizguardConfig,
) -> IntegrityReport {
    let validation = Validator::new(config.validator.clone()).validate(records, source_text);
    IntegrityReport::from_validation(validation, &config.report, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_all;
    use serde_json::json;

    fn full_record(i: usize) -> serde_json::Value {
        json!({
            "raw_question": format!("Question {i}"),
            "raw_options": ["a", "b", "c", "d"],
            "raw_answer": "A"
        })
    }

    #[test]
    fn low_count_recommendation() {
        let mut records = normalize_all(&[full_record(1)]);
        let report = create_integrity_report(&mut records, Some("text"), &QuizguardConfig::default());
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.original_text_length, 4);
        assert_eq!(report.recommendations, vec![LOW_COUNT_RECOMMENDATION]);
        assert_eq!(report.checksum, report.validation.checksum);
    }

    #[test]
    fn no_recommendations_for_large_complete_set() {
        let values: Vec<_> = (0..12).map(full_record).collect();
        let mut records = normalize_all(&values);
        let report = create_integrity_report(&mut records, None, &QuizguardConfig::default());
        assert!(report.recommendations.is_empty());
        assert!(report.validation.passed);
    }

    #[test]
    fn incomplete_options_recommendation() {
        let mut values: Vec<_> = (0..12).map(full_record).collect();
        values.push(json!({"raw_question": "Q", "raw_options": ["a", "b", "", ""], "raw_answer": "B"}));
        values.push(json!({"raw_question": "Q", "raw_options": ["a", "b"], "raw_answer": "B"}));
        let mut records = normalize_all(&values);
        let report = create_integrity_report(&mut records, None, &QuizguardConfig::default());
        assert_eq!(report.recommendations, vec![INCOMPLETE_OPTIONS_RECOMMENDATION]);
        assert!(report.validation.passed);
    }

    #[test]
    fn threshold_from_config() {
        let mut config = QuizguardConfig::default();
        config.report.min_expected_questions = 1;
        let mut records = normalize_all(&[full_record(1)]);
        let report = create_integrity_report(&mut records, None, &config);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let mut records = normalize_all(&[json!({"raw_question": "", "raw_options": ["A"], "raw_answer": ""})]);
        let report = create_integrity_report(&mut records, Some("source"), &QuizguardConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.save_json(&path).unwrap();
        let loaded = IntegrityReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.checksum, report.checksum);
        assert_eq!(loaded.validation.issues, report.validation.issues);
        assert!(!loaded.validation.passed);
    }

    #[test]
    fn report_json_shape() {
        let mut records = normalize_all(&[full_record(1)]);
        let report = create_integrity_report(&mut records, Some("abc"), &QuizguardConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "timestamp",
            "original_text_length",
            "total_questions",
            "checksum",
            "validation",
            "recommendations",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        for key in ["original_length", "extracted_count", "checksum", "issues", "warnings", "passed"] {
            assert!(json["validation"].get(key).is_some(), "missing validation.{key}");
        }
    }
}
