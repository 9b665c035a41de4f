//! Unwrapping the extraction service's response into raw record values.
//!
//! The upstream returns free text that should contain a JSON object of the
//! form `{"questions": [...]}`. Anything inside the list is passed through
//! untouched, including elements that are not objects: the normalizer turns
//! those into empty records rather than dropping them.

use serde_json::Value;

use crate::error::EnvelopeError;
use crate::normalizer::json_kind;

/// Extract the raw record list from an extraction response.
///
/// Leading prose before the first `{` and trailing text after the JSON
/// object are ignored.
pub fn parse_extraction_response(response: &str) -> Result<Vec<Value>, EnvelopeError> {
    let start = response.find('{').ok_or(EnvelopeError::NoJsonObject)?;

    let mut stream = serde_json::Deserializer::from_str(&response[start..]).into_iter::<Value>();
    let value = match stream.next() {
        Some(result) => result?,
        None => return Err(EnvelopeError::NoJsonObject),
    };

    let records = questions_from_object(value)?;
    tracing::debug!(count = records.len(), "parsed extraction response");
    Ok(records)
}

/// Accept either a `{"questions": [...]}` envelope or a bare array.
pub fn records_from_value(value: Value) -> Result<Vec<Value>, EnvelopeError> {
    match value {
        Value::Array(items) => Ok(items),
        other => questions_from_object(other),
    }
}

fn questions_from_object(value: Value) -> Result<Vec<Value>, EnvelopeError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Err(EnvelopeError::QuestionsNotList(json_kind(&other))),
    };
    match map.remove("questions") {
        None => Err(EnvelopeError::MissingQuestions),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(EnvelopeError::QuestionsNotList(json_kind(&other))),
    }
}
