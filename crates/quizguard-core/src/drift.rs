//! Drift detection between two captures of the same record collection.

use serde::{Deserialize, Serialize};

use crate::checksum::collection_checksum;
use crate::model::CanonicalRecord;

/// Result of comparing two captures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub baseline_checksum: String,
    pub current_checksum: String,
    pub baseline_count: usize,
    pub current_count: usize,
    /// Positions present in both captures whose content or answer differs.
    pub changed: Vec<RecordChange>,
    /// Records in current but not baseline.
    pub added: usize,
    /// Records in baseline but not current.
    pub removed: usize,
}

/// A record whose content drifted. `question_index` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordChange {
    pub question_index: usize,
    pub baseline_checksum: String,
    pub current_checksum: String,
    /// Only the correct answer moved; text and options are identical.
    pub answer_only: bool,
}

/// Compare two captures position by position.
pub fn compare_captures(baseline: &[CanonicalRecord], current: &[CanonicalRecord]) -> DriftReport {
    let changed = baseline
        .iter()
        .zip(current)
        .enumerate()
        .filter(|(_, (b, c))| {
            b.checksum != c.checksum || b.correct_option_index != c.correct_option_index
        })
        .map(|(i, (b, c))| RecordChange {
            question_index: i + 1,
            baseline_checksum: b.checksum.clone(),
            current_checksum: c.checksum.clone(),
            answer_only: b.checksum == c.checksum,
        })
        .collect();

    DriftReport {
        baseline_checksum: collection_checksum(baseline),
        current_checksum: collection_checksum(current),
        baseline_count: baseline.len(),
        current_count: current.len(),
        changed,
        added: current.len().saturating_sub(baseline.len()),
        removed: baseline.len().saturating_sub(current.len()),
    }
}

impl DriftReport {
    /// True when the two captures differ in any way.
    pub fn has_drift(&self) -> bool {
        self.baseline_checksum != self.current_checksum
            || !self.changed.is_empty()
            || self.added > 0
            || self.removed > 0
    }

    /// Format the drift report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} changed, {} added, {} removed ({} -> {} records)\n\n",
            self.changed.len(),
            self.added,
            self.removed,
            self.baseline_count,
            self.current_count
        ));
        md.push_str(&format!(
            "Collection checksum: `{}` -> `{}`\n\n",
            self.baseline_checksum, self.current_checksum
        ));

        if !self.changed.is_empty() {
            md.push_str("### Changed records\n\n");
            md.push_str("| Question | Baseline | Current | Change |\n");
            md.push_str("|----------|----------|---------|--------|\n");
            for c in &self.changed {
                md.push_str(&format!(
                    "| {} | `{}` | `{}` | {} |\n",
                    c.question_index,
                    c.baseline_checksum,
                    c.current_checksum,
                    if c.answer_only { "answer" } else { "content" }
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str, options: &[&str], correct: Option<usize>) -> CanonicalRecord {
        CanonicalRecord::new(
            question.into(),
            options.iter().map(|s| s.to_string()).collect(),
            correct,
            false,
        )
    }

    #[test]
    fn identical_captures() {
        let a = vec![record("q1", &["a", "b"], Some(0)), record("q2", &["c", "d"], Some(1))];
        let report = compare_captures(&a, &a.clone());
        assert!(!report.has_drift());
        assert!(report.changed.is_empty());
        assert_eq!(report.baseline_checksum, report.current_checksum);
    }

    #[test]
    fn option_text_change_is_detected() {
        let baseline = vec![record("q1", &["a", "b"], Some(0)), record("q2", &["c", "d"], Some(1))];
        let current = vec![record("q1", &["a", "b"], Some(0)), record("q2", &["c", "e"], Some(1))];
        let report = compare_captures(&baseline, &current);
        assert!(report.has_drift());
        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0].question_index, 2);
        assert!(!report.changed[0].answer_only);
    }

    #[test]
    fn answer_change_is_detected() {
        let baseline = vec![record("q1", &["a", "b"], Some(0))];
        let current = vec![record("q1", &["a", "b"], Some(1))];
        let report = compare_captures(&baseline, &current);
        assert!(report.has_drift());
        assert!(report.changed[0].answer_only);
    }

    #[test]
    fn lost_records_are_counted() {
        let baseline = vec![
            record("q1", &["a"], None),
            record("q2", &["b"], None),
            record("q3", &["c"], None),
        ];
        let current = vec![record("q1", &["a"], None)];
        let report = compare_captures(&baseline, &current);
        assert_eq!(report.removed, 2);
        assert_eq!(report.added, 0);
        assert!(report.has_drift());
    }

    #[test]
    fn markdown_output() {
        let baseline = vec![record("q1", &["a", "b"], Some(0))];
        let current = vec![record("q1", &["a", "c"], Some(0))];
        let md = compare_captures(&baseline, &current).to_markdown();
        assert!(md.contains("Changed records"));
        assert!(md.contains("| 1 |"));
        assert!(md.contains("content"));
    }
}
