//! Schema normalization.
//!
//! Maps loosely-typed upstream dictionaries onto [`CanonicalRecord`]. The
//! normalizer is total: every input value, however malformed, yields exactly
//! one record. It records where each slot came from in [`Provenance`] and
//! leaves every judgment about severity to the validator.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{letter_index, CanonicalRecord};

/// How an answer slot encodes the correct option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerForm {
    /// A letter (`"A"`..`"Z"`) or the literal option text.
    LetterOrText,
    /// A zero-based integer index.
    Index,
}

/// Source keys for the question text, highest priority first.
const QUESTION_SLOT: &[&str] = &["raw_question", "question", "title"];

/// Source keys for the options, highest priority first.
const OPTIONS_SLOT: &[&str] = &["raw_options", "options"];

/// Source keys for the answer, highest priority first.
const ANSWER_SLOT: &[(&str, AnswerForm)] = &[
    ("raw_answer", AnswerForm::LetterOrText),
    ("answer", AnswerForm::LetterOrText),
    ("correctOptionIndex", AnswerForm::Index),
];

lazy_static! {
    static ref CODE_MARKERS: Regex = Regex::new(
        r"#include|int\s+main|printf|scanf|for\s*\(|while\s*\(|if\s*\(|void\s+|char\s+|float\s+|double\s+",
    )
    .unwrap();
}

/// Shape the options slot had in the source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsShape {
    /// A JSON array.
    Sequence,
    /// A label → text object, flattened in sorted label order.
    Mapping,
    /// Present, but neither an array nor an object.
    Invalid,
    /// No options key at all.
    Absent,
}

/// Where each canonical slot came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// False when the upstream value was not a JSON object.
    pub is_mapping: bool,
    /// Source key that supplied the question text.
    pub question_key: Option<&'static str>,
    /// Source key that supplied the options.
    pub options_key: Option<&'static str>,
    /// Source key that supplied the answer.
    pub answer_key: Option<&'static str>,
    pub options_shape: OptionsShape,
    /// The answer slot was absent, null, or whitespace-only.
    pub answer_blank: bool,
    /// Answer text that could not be mapped to an option position.
    pub unresolved_answer: Option<String>,
}

impl Provenance {
    fn not_a_mapping() -> Self {
        Self {
            is_mapping: false,
            question_key: None,
            options_key: None,
            answer_key: None,
            options_shape: OptionsShape::Absent,
            answer_blank: true,
            unresolved_answer: None,
        }
    }
}

/// A canonical record together with its source provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: CanonicalRecord,
    pub provenance: Provenance,
}

enum AnswerResolution {
    Resolved(usize),
    Blank,
    Unresolved(String),
}

/// Whether the text contains programming-language constructs.
pub fn detect_code(text: &str) -> bool {
    CODE_MARKERS.is_match(text)
}

/// Normalize every upstream value, preserving count and order.
pub fn normalize_all(values: &[Value]) -> Vec<NormalizedRecord> {
    let normalized: Vec<_> = values.iter().map(normalize).collect();
    tracing::debug!(count = normalized.len(), "normalized records");
    normalized
}

/// Strip provenance, keeping only the canonical records.
pub fn into_records(normalized: Vec<NormalizedRecord>) -> Vec<CanonicalRecord> {
    normalized.into_iter().map(|n| n.record).collect()
}

/// Normalize one upstream value into a canonical record.
pub fn normalize(value: &Value) -> NormalizedRecord {
    let Some(map) = value.as_object() else {
        tracing::warn!(kind = json_kind(value), "upstream record is not a mapping");
        return NormalizedRecord {
            record: CanonicalRecord::new(String::new(), Vec::new(), None, false),
            provenance: Provenance::not_a_mapping(),
        };
    };

    let question = lookup(map, QUESTION_SLOT);
    let question_text = question.map(|(_, v)| value_to_text(v)).unwrap_or_default();

    let options_slot = lookup(map, OPTIONS_SLOT);
    let (options, options_shape) = match options_slot {
        None => (Vec::new(), OptionsShape::Absent),
        Some((_, Value::Array(items))) => (
            items.iter().map(value_to_text).collect(),
            OptionsShape::Sequence,
        ),
        Some((_, Value::Object(labelled))) => {
            let mut pairs: Vec<_> = labelled.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            (
                pairs.into_iter().map(|(_, v)| value_to_text(v)).collect(),
                OptionsShape::Mapping,
            )
        }
        Some((_, _)) => (Vec::new(), OptionsShape::Invalid),
    };

    let answer = lookup_answer(map);
    let resolution = match answer {
        None => AnswerResolution::Blank,
        Some((_, form, v)) => resolve_answer(v, form, &options),
    };

    let (correct_option_index, answer_blank, unresolved_answer) = match resolution {
        AnswerResolution::Resolved(i) => (Some(i), false, None),
        AnswerResolution::Blank => (None, true, None),
        AnswerResolution::Unresolved(raw) => {
            tracing::warn!(
                answer = %raw,
                options = options.len(),
                "answer does not map to an option, marking as indeterminate"
            );
            (None, false, Some(raw))
        }
    };

    let has_code = detect_code(&question_text);
    let record = CanonicalRecord::new(question_text, options, correct_option_index, has_code);

    NormalizedRecord {
        record,
        provenance: Provenance {
            is_mapping: true,
            question_key: question.map(|(k, _)| k),
            options_key: options_slot.map(|(k, _)| k),
            answer_key: answer.map(|(k, _, _)| k),
            options_shape,
            answer_blank,
            unresolved_answer,
        },
    }
}

/// First key in priority order with a non-null value, falling back to the
/// first key present at all.
fn lookup<'a>(
    map: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    let mut present = keys.iter().filter_map(|&k| map.get(k).map(|v| (k, v)));
    let first = present.next()?;
    if !first.1.is_null() {
        return Some(first);
    }
    present.find(|(_, v)| !v.is_null()).or(Some(first))
}

/// Like [`lookup`], but skips blank strings as well as nulls.
fn lookup_answer(map: &Map<String, Value>) -> Option<(&'static str, AnswerForm, &Value)> {
    let mut present = ANSWER_SLOT
        .iter()
        .filter_map(|&(k, form)| map.get(k).map(|v| (k, form, v)));
    let first = present.next()?;
    if !is_blank(first.2, first.1) {
        return Some(first);
    }
    present
        .find(|&(_, form, v)| !is_blank(v, form))
        .or(Some(first))
}

/// Null, whitespace-only, or the `-1` index sentinel written for records
/// without an answer.
fn is_blank(value: &Value, form: AnswerForm) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Number(n) => form == AnswerForm::Index && n.as_i64() == Some(-1),
        _ => false,
    }
}

fn resolve_answer(value: &Value, form: AnswerForm, options: &[String]) -> AnswerResolution {
    if is_blank(value, form) {
        return AnswerResolution::Blank;
    }
    match form {
        AnswerForm::LetterOrText => {
            let text = value_to_text(value);
            let trimmed = text.trim();
            let position = match letter_index(trimmed) {
                Some(i) => Some(i).filter(|&i| i < options.len()),
                None => options.iter().position(|o| o.trim() == trimmed),
            };
            match position {
                Some(i) => AnswerResolution::Resolved(i),
                None => AnswerResolution::Unresolved(trimmed.to_string()),
            }
        }
        AnswerForm::Index => {
            let index = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            match index {
                Some(i) if i >= 0 && (i as usize) < options.len() => {
                    AnswerResolution::Resolved(i as usize)
                }
                _ => AnswerResolution::Unresolved(value_to_text(value)),
            }
        }
    }
}

/// String representation of any JSON value; `null` becomes empty.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Short JSON type name, for diagnostics.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_shape() {
        let n = normalize(&json!({
            "raw_question": "What is 2+2?",
            "raw_options": ["3", "4", "5", "6"],
            "raw_answer": "B"
        }));
        assert_eq!(n.record.question_text, "What is 2+2?");
        assert_eq!(n.record.options, vec!["3", "4", "5", "6"]);
        assert_eq!(n.record.correct_option_index, Some(1));
        assert_eq!(n.provenance.question_key, Some("raw_question"));
        assert_eq!(n.provenance.options_shape, OptionsShape::Sequence);
        assert!(!n.provenance.answer_blank);
    }

    #[test]
    fn alternate_shape_with_index() {
        let n = normalize(&json!({
            "question": "Pick",
            "options": ["a", "b", "c"],
            "correctOptionIndex": 2
        }));
        assert_eq!(n.record.question_text, "Pick");
        assert_eq!(n.record.correct_option_index, Some(2));
        assert_eq!(n.provenance.answer_key, Some("correctOptionIndex"));
    }

    #[test]
    fn slot_priority() {
        let n = normalize(&json!({
            "title": "third",
            "question": "second",
            "raw_question": "first",
            "options": ["no"],
            "raw_options": ["yes", "also"],
            "correctOptionIndex": 0,
            "answer": "B"
        }));
        assert_eq!(n.record.question_text, "first");
        assert_eq!(n.record.options, vec!["yes", "also"]);
        // `answer` outranks `correctOptionIndex`.
        assert_eq!(n.record.correct_option_index, Some(1));
        assert_eq!(n.provenance.answer_key, Some("answer"));
    }

    #[test]
    fn null_high_priority_slot_falls_through() {
        let n = normalize(&json!({
            "raw_question": null,
            "question": "fallback",
            "raw_answer": "",
            "answer": "A",
            "options": ["x", "y"]
        }));
        assert_eq!(n.record.question_text, "fallback");
        assert_eq!(n.record.correct_option_index, Some(0));
    }

    #[test]
    fn letter_round_trip() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": ["w", "x", "y", "z"],
            "raw_answer": "C"
        }));
        assert_eq!(n.record.correct_option_index, Some(2));
        assert_eq!(n.record.answer_letter(), "C");
    }

    #[test]
    fn lowercase_padded_letter() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": ["w", "x"],
            "raw_answer": "  b\n"
        }));
        assert_eq!(n.record.correct_option_index, Some(1));
    }

    #[test]
    fn letters_beyond_d_are_supported() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": ["1", "2", "3", "4", "5", "6"],
            "raw_answer": "F"
        }));
        assert_eq!(n.record.correct_option_index, Some(5));
    }

    #[test]
    fn letter_out_of_range_is_unresolved() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": ["1", "2"],
            "raw_answer": "D"
        }));
        assert_eq!(n.record.correct_option_index, None);
        assert_eq!(n.provenance.unresolved_answer.as_deref(), Some("D"));
        assert!(!n.provenance.answer_blank);
    }

    #[test]
    fn answer_given_as_option_text() {
        let n = normalize(&json!({
            "question": "Capital of France?",
            "options": ["Berlin", "Paris", "Rome"],
            "answer": " Paris "
        }));
        assert_eq!(n.record.correct_option_index, Some(1));
    }

    #[test]
    fn index_out_of_range_is_unresolved() {
        for bad in [json!(3), json!(-2), json!(1.5), json!(true)] {
            let n = normalize(&json!({
                "question": "Q",
                "options": ["a", "b", "c"],
                "correctOptionIndex": bad
            }));
            assert_eq!(n.record.correct_option_index, None, "input {bad}");
            assert!(n.provenance.unresolved_answer.is_some());
        }
    }

    #[test]
    fn index_sentinel_is_blank() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": ["a", "b", "c", "d"],
            "raw_answer": "",
            "correctOptionIndex": -1
        }));
        assert_eq!(n.record.correct_option_index, None);
        assert!(n.provenance.answer_blank);
        assert!(n.provenance.unresolved_answer.is_none());
        assert_eq!(n.provenance.answer_key, Some("raw_answer"));
    }

    #[test]
    fn index_as_string() {
        let n = normalize(&json!({
            "question": "Q",
            "options": ["a", "b"],
            "correctOptionIndex": " 1 "
        }));
        assert_eq!(n.record.correct_option_index, Some(1));
    }

    #[test]
    fn mapping_options_are_sorted_by_label() {
        let n = normalize(&json!({
            "question": "Q",
            "options": {"C": "third", "A": "first", "B": "second"},
            "answer": "B"
        }));
        assert_eq!(n.record.options, vec!["first", "second", "third"]);
        assert_eq!(n.provenance.options_shape, OptionsShape::Mapping);
        assert_eq!(n.record.correct_option(), Some("second"));
    }

    #[test]
    fn non_string_options_are_coerced_in_place() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": [1, null, true, "d", [1, 2]],
            "raw_answer": "E"
        }));
        assert_eq!(n.record.options, vec!["1", "", "true", "d", "[1,2]"]);
        assert_eq!(n.record.correct_option_index, Some(4));
    }

    #[test]
    fn invalid_options_shape() {
        let n = normalize(&json!({
            "raw_question": "Q",
            "raw_options": "A) yes B) no",
            "raw_answer": "A"
        }));
        assert!(n.record.options.is_empty());
        assert_eq!(n.provenance.options_shape, OptionsShape::Invalid);
        assert_eq!(n.record.correct_option_index, None);
    }

    #[test]
    fn question_whitespace_preserved() {
        let text = "  int main() {\n\treturn 0;\n}  ";
        let n = normalize(&json!({"raw_question": text, "raw_options": [], "raw_answer": ""}));
        assert_eq!(n.record.question_text, text);
        assert!(n.record.has_code);
    }

    #[test]
    fn non_mapping_yields_empty_record() {
        for value in [json!("just text"), json!(null), json!([1, 2]), json!(42)] {
            let n = normalize(&value);
            assert_eq!(n.record.question_text, "");
            assert!(n.record.options.is_empty());
            assert_eq!(n.record.correct_option_index, None);
            assert!(!n.provenance.is_mapping);
        }
    }

    #[test]
    fn empty_mapping_records_absent_slots() {
        let n = normalize(&json!({}));
        assert!(n.provenance.is_mapping);
        assert_eq!(n.provenance.question_key, None);
        assert_eq!(n.provenance.options_shape, OptionsShape::Absent);
        assert!(n.provenance.answer_blank);
    }

    #[test]
    fn code_detection() {
        assert!(detect_code("#include <stdio.h>"));
        assert!(detect_code("for (i = 0; i < n; i++)"));
        assert!(detect_code("void  f();"));
        assert!(!detect_code("Which river is longest?"));
        assert!(!detect_code("format the page"));
    }

    #[test]
    fn count_preserved() {
        let values = vec![json!({}), json!("bad"), json!(null), json!({"question": "ok"})];
        let normalized = normalize_all(&values);
        assert_eq!(normalized.len(), 4);
        assert_eq!(normalized[3].record.question_text, "ok");
    }

    #[test]
    fn checksum_matches_content() {
        let n = normalize(&json!({"raw_question": "Q", "raw_options": ["A", "B"], "raw_answer": "A"}));
        assert_eq!(
            n.record.checksum,
            crate::checksum::record_checksum("Q", &["A".to_string(), "B".to_string()])
        );
    }
}
