//! Integrity validation.
//!
//! Classifies every normalized record without discarding any of them.
//! Issues are blocking (any issue fails the collection); warnings are
//! presentation advisories and never affect `passed`.

use crate::checksum::{collection_checksum, text_checksum};
use crate::config::ValidatorConfig;
use crate::model::{Issue, IssueKind, Severity, ValidationReport};
use crate::normalizer::{NormalizedRecord, OptionsShape};

/// Validates normalized records against configurable thresholds.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Structural checks for one record. `index` is 1-based.
    pub fn check_record(&self, normalized: &NormalizedRecord, index: usize) -> Vec<Issue> {
        let record = &normalized.record;
        let provenance = &normalized.provenance;
        let mut issues = Vec::new();

        let required = [
            ("raw_question", provenance.question_key.is_none()),
            ("raw_options", provenance.options_shape == OptionsShape::Absent),
            ("raw_answer", provenance.answer_key.is_none()),
        ];
        for (field, missing) in required {
            if missing {
                issues.push(
                    Issue::new(
                        IssueKind::MissingField,
                        index,
                        Severity::High,
                        format!("question {index} is missing the {field} field"),
                    )
                    .with_field(field),
                );
            }
        }

        if record.question_text.trim().is_empty() {
            issues.push(Issue::new(
                IssueKind::EmptyQuestion,
                index,
                Severity::High,
                format!("question {index} has empty question text"),
            ));
        }

        if provenance.options_shape == OptionsShape::Invalid {
            issues.push(Issue::new(
                IssueKind::InvalidOptions,
                index,
                Severity::Medium,
                format!("question {index} options are not a list"),
            ));
        } else if record.options.len() < self.config.min_options {
            issues.push(Issue::new(
                IssueKind::InsufficientOptions,
                index,
                Severity::Medium,
                format!(
                    "question {index} has {} option(s), at least {} required",
                    record.options.len(),
                    self.config.min_options
                ),
            ));
        }

        if provenance.answer_blank {
            issues.push(Issue::new(
                IssueKind::EmptyAnswer,
                index,
                Severity::Medium,
                format!("question {index} has no answer"),
            ));
        }

        issues
    }

    /// Presentation advisories for one record. `index` is 1-based.
    pub fn record_warnings(&self, normalized: &NormalizedRecord, index: usize) -> Vec<Issue> {
        let record = &normalized.record;
        let mut warnings = Vec::new();

        if record.options.len() < self.config.recommended_options {
            warnings.push(
                Issue::new(
                    IssueKind::IncompleteOptions,
                    index,
                    Severity::Low,
                    format!(
                        "question {index} has fewer than {} options, will be auto-handled",
                        self.config.recommended_options
                    ),
                )
                .with_action("display_with_warning"),
            );
        }

        if record.question_text.contains(['\n', '\r']) {
            warnings.push(Issue::new(
                IssueKind::NewlineCharacters,
                index,
                Severity::Low,
                format!("question {index} contains line breaks, displayed as-is"),
            ));
        }

        if record.question_text.contains(['"', '\'']) {
            warnings.push(Issue::new(
                IssueKind::QuoteCharacters,
                index,
                Severity::Low,
                format!("question {index} contains quotes, displayed as-is"),
            ));
        }

        if let Some(raw) = &normalized.provenance.unresolved_answer {
            warnings.push(
                Issue::new(
                    IssueKind::UnresolvableAnswer,
                    index,
                    Severity::Low,
                    format!(
                        "question {index} answer {raw:?} does not match any of its {} option(s)",
                        record.options.len()
                    ),
                )
                .with_action("display_without_answer_key"),
            );
        }

        warnings
    }

    /// Validate a collection, attaching issues and warnings to each record
    /// in place. Records are never removed or reordered.
    pub fn validate(
        &self,
        records: &mut [NormalizedRecord],
        source_text: Option<&str>,
    ) -> ValidationReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for (i, normalized) in records.iter_mut().enumerate() {
            let index = i + 1;
            let record_issues = self.check_record(normalized, index);
            let record_warnings = self.record_warnings(normalized, index);

            issues.extend(record_issues.iter().cloned());
            warnings.extend(record_warnings.iter().cloned());
            normalized.record.issues = record_issues;
            normalized.record.warnings = record_warnings;
        }

        let passed = issues.is_empty();
        let report = ValidationReport {
            original_length: source_text.map_or(0, |t| t.chars().count()),
            extracted_count: records.len(),
            checksum: collection_checksum(records.iter().map(|n| &n.record)),
            source_checksum: source_text.map(text_checksum),
            issues,
            warnings,
            passed,
        };

        tracing::info!(
            records = report.extracted_count,
            issues = report.issues.len(),
            warnings = report.warnings.len(),
            passed = report.passed,
            checksum = %report.checksum,
            "validation complete"
        );

        report
    }
}
