//! Markdown rendering for integrity reports.

use quizguard_core::model::{Issue, Severity};
use quizguard_core::report::IntegrityReport;

/// Escape characters that would break a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn issue_table(md: &mut String, issues: &[Issue]) {
    md.push_str("| Question | Type | Severity | Message | Action |\n");
    md.push_str("|----------|------|----------|---------|--------|\n");
    for i in issues {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            i.record_index,
            i.kind,
            i.severity,
            cell(&i.message),
            i.action_hint.as_deref().unwrap_or("")
        ));
    }
    md.push('\n');
}

/// Render an integrity report as Markdown.
pub fn to_markdown(report: &IntegrityReport) -> String {
    let v = &report.validation;
    let mut md = String::new();

    md.push_str("## Integrity report\n\n");
    md.push_str(&format!(
        "**Status:** {} | {} questions | checksum `{}` | {}\n\n",
        if v.passed { "PASSED" } else { "FAILED" },
        report.total_questions,
        report.checksum,
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if let Some(source) = &v.source_checksum {
        md.push_str(&format!(
            "Source text: {} characters, checksum `{}`\n\n",
            report.original_text_length, source
        ));
    }

    md.push_str(&format!(
        "**Issues:** {} high, {} medium, {} low | **Warnings:** {}\n\n",
        v.count_severity(Severity::High),
        v.count_severity(Severity::Medium),
        v.count_severity(Severity::Low),
        v.warnings.len()
    ));

    if !v.issues.is_empty() {
        md.push_str("### Issues\n\n");
        issue_table(&mut md, &v.issues);
    }

    if !v.warnings.is_empty() {
        md.push_str("### Warnings\n\n");
        issue_table(&mut md, &v.warnings);
    }

    if !report.recommendations.is_empty() {
        md.push_str("### Recommendations\n\n");
        for r in &report.recommendations {
            md.push_str(&format!("- {r}\n"));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_report;

    #[test]
    fn markdown_sections() {
        let md = to_markdown(&sample_report());
        assert!(md.contains("FAILED"));
        assert!(md.contains("`0a1b2c3d`"));
        assert!(md.contains("2 high, 0 medium, 0 low"));
        assert!(md.contains("### Issues"));
        assert!(md.contains("| 2 | empty_question | high |"));
        assert!(md.contains("display_with_warning"));
        assert!(md.contains("- low question count"));
    }

    #[test]
    fn passing_report_omits_issue_table() {
        let mut report = sample_report();
        report.validation.issues.clear();
        report.validation.passed = true;
        let md = to_markdown(&report);
        assert!(md.contains("PASSED"));
        assert!(!md.contains("### Issues"));
        assert!(md.contains("### Warnings"));
    }

    #[test]
    fn pipes_are_escaped() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }
}
