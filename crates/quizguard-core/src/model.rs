//! Core data model types for quizguard.
//!
//! These are the types every component shares: the canonical quiz record,
//! the issues attached to it, and the collection-level validation report.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::checksum::record_checksum;

/// Letters used for user-facing option labels, `options[0]` is `A`.
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Map a zero-based option index to its display letter.
pub fn answer_letter(index: usize) -> Option<char> {
    LETTERS.chars().nth(index)
}

/// Map a letter (case-insensitive, surrounding whitespace ignored) to its
/// zero-based alphabetic position. Anything other than a single ASCII
/// letter yields `None`.
pub fn letter_index(answer: &str) -> Option<usize> {
    let mut chars = answer.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => None,
    }
}

/// The single normalized representation of one quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Prompt text, verbatim.
    pub question_text: String,
    /// Answer choices in display order.
    pub options: Vec<String>,
    /// Zero-based index of the correct option; `None` when indeterminate.
    /// Serialized as `-1` in that case.
    pub correct_option_index: Option<usize>,
    /// Presentation hint: the question contains source code.
    pub has_code: bool,
    /// Digest of `question_text` and `options`.
    pub checksum: String,
    /// Blocking problems, attached by the validator.
    pub issues: Vec<Issue>,
    /// Non-blocking advisories, attached by the validator.
    pub warnings: Vec<Issue>,
}

impl CanonicalRecord {
    /// Build a record and compute its checksum. Issues and warnings start empty.
    pub fn new(
        question_text: String,
        options: Vec<String>,
        correct_option_index: Option<usize>,
        has_code: bool,
    ) -> Self {
        let checksum = record_checksum(&question_text, &options);
        Self {
            question_text,
            options,
            correct_option_index,
            has_code,
            checksum,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Replace the options and correct index, recomputing the checksum.
    pub fn with_options(&self, options: Vec<String>, correct_option_index: Option<usize>) -> Self {
        Self {
            checksum: record_checksum(&self.question_text, &options),
            options,
            correct_option_index,
            ..self.clone()
        }
    }

    /// The correct index as it appears on the wire: `-1` when unknown.
    pub fn correct_index_wire(&self) -> i64 {
        self.correct_option_index.map_or(-1, |i| i as i64)
    }

    /// The correct answer as a letter, or an empty string when there is none.
    pub fn answer_letter(&self) -> String {
        self.correct_option_index
            .and_then(answer_letter)
            .map(String::from)
            .unwrap_or_default()
    }

    /// The text of the correct option, if one is marked.
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_option_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Whether the correct index points inside `options` (or is unknown).
    pub fn index_in_range(&self) -> bool {
        self.correct_option_index
            .map_or(true, |i| i < self.options.len())
    }

    /// The content-only view used for collection checksums.
    pub fn content(&self) -> RecordContent<'_> {
        RecordContent {
            raw_question: &self.question_text,
            raw_options: &self.options,
            raw_answer: self.answer_letter(),
        }
    }
}

/// Content fields of a record in the upstream wire shape.
#[derive(Debug, Serialize)]
pub struct RecordContent<'a> {
    pub raw_question: &'a str,
    pub raw_options: &'a [String],
    pub raw_answer: String,
}

#[derive(Serialize)]
struct RecordWire<'a> {
    raw_question: &'a str,
    raw_options: &'a [String],
    raw_answer: String,
    #[serde(rename = "correctOptionIndex")]
    correct_option_index: i64,
    has_code: bool,
    checksum: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    issues: &'a [Issue],
    #[serde(skip_serializing_if = "is_empty")]
    warnings: &'a [Issue],
}

fn is_empty(issues: &&[Issue]) -> bool {
    issues.is_empty()
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordWire {
            raw_question: &self.question_text,
            raw_options: &self.options,
            raw_answer: self.answer_letter(),
            correct_option_index: self.correct_index_wire(),
            has_code: self.has_code,
            checksum: &self.checksum,
            issues: &self.issues,
            warnings: &self.warnings,
        }
        .serialize(serializer)
    }
}

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingField,
    EmptyQuestion,
    InvalidOptions,
    InsufficientOptions,
    EmptyAnswer,
    IncompleteOptions,
    NewlineCharacters,
    QuoteCharacters,
    UnresolvableAnswer,
}

impl IssueKind {
    /// All kinds, issues first, then warnings.
    pub const ALL: [IssueKind; 9] = [
        IssueKind::MissingField,
        IssueKind::EmptyQuestion,
        IssueKind::InvalidOptions,
        IssueKind::InsufficientOptions,
        IssueKind::EmptyAnswer,
        IssueKind::IncompleteOptions,
        IssueKind::NewlineCharacters,
        IssueKind::QuoteCharacters,
        IssueKind::UnresolvableAnswer,
    ];

    /// The wire name, as used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingField => "missing_field",
            IssueKind::EmptyQuestion => "empty_question",
            IssueKind::InvalidOptions => "invalid_options",
            IssueKind::InsufficientOptions => "insufficient_options",
            IssueKind::EmptyAnswer => "empty_answer",
            IssueKind::IncompleteOptions => "incomplete_options",
            IssueKind::NewlineCharacters => "newline_characters",
            IssueKind::QuoteCharacters => "quote_characters",
            IssueKind::UnresolvableAnswer => "unresolvable_answer",
        }
    }

    /// One-line human description.
    pub fn describe(&self) -> &'static str {
        match self {
            IssueKind::MissingField => "A required slot is absent from the source record",
            IssueKind::EmptyQuestion => "The question text is empty",
            IssueKind::InvalidOptions => "The options slot is not a list",
            IssueKind::InsufficientOptions => "Fewer than the minimum number of options",
            IssueKind::EmptyAnswer => "The answer slot is empty",
            IssueKind::IncompleteOptions => "Fewer options than recommended",
            IssueKind::NewlineCharacters => "The question contains line breaks",
            IssueKind::QuoteCharacters => "The question contains quote characters",
            IssueKind::UnresolvableAnswer => "The answer does not map to any option",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem or advisory attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// 1-based record number, matching user-facing numbering.
    #[serde(rename = "question_index")]
    pub record_index: usize,
    pub severity: Severity,
    pub message: String,
    /// Suggested presentation handling.
    #[serde(rename = "action", default, skip_serializing_if = "Option::is_none")]
    pub action_hint: Option<String>,
    /// Source slot name, for `missing_field`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, record_index: usize, severity: Severity, message: String) -> Self {
        Self {
            kind,
            record_index,
            severity,
            message,
            action_hint: None,
            field: None,
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action_hint = Some(action.to_string());
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

/// Collection-level result of integrity validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Length of the source text in characters (0 when none was supplied).
    pub original_length: usize,
    /// Number of records validated.
    pub extracted_count: usize,
    /// Checksum over the full record collection.
    pub checksum: String,
    /// Checksum of the source text, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_checksum: Option<String>,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// True iff `issues` is empty.
    pub passed: bool,
}

impl ValidationReport {
    /// Count issues at the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Whether any warning of the given kind was raised.
    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}
