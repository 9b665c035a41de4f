//! Markdown and SARIF rendering of integrity reports.

pub mod markdown;
pub mod sarif;

pub use markdown::to_markdown;
pub use sarif::{generate_sarif, write_sarif_report};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use quizguard_core::model::{Issue, IssueKind, Severity, ValidationReport};
    use quizguard_core::report::IntegrityReport;

    pub fn sample_report() -> IntegrityReport {
        IntegrityReport {
            id: uuid::Uuid::nil(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            original_text_length: 120,
            total_questions: 2,
            checksum: "0a1b2c3d".into(),
            validation: ValidationReport {
                original_length: 120,
                extracted_count: 2,
                checksum: "0a1b2c3d".into(),
                source_checksum: Some("ffee0011".into()),
                issues: vec![
                    Issue::new(
                        IssueKind::EmptyQuestion,
                        2,
                        Severity::High,
                        "question 2 has empty question text".into(),
                    ),
                    Issue::new(
                        IssueKind::MissingField,
                        2,
                        Severity::High,
                        "question 2 is missing the raw_answer field".into(),
                    )
                    .with_field("raw_answer"),
                ],
                warnings: vec![Issue::new(
                    IssueKind::IncompleteOptions,
                    1,
                    Severity::Low,
                    "question 1 has fewer than 4 options, will be auto-handled".into(),
                )
                .with_action("display_with_warning")],
                passed: false,
            },
            recommendations: vec!["low question count".into()],
        }
    }
}
