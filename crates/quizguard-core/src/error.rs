//! Extraction envelope error types.
//!
//! Data-quality problems inside individual records are never errors: they
//! are reported as issues. These errors cover the one failure class the
//! core refuses to paper over, an envelope that holds no record list at all.

use thiserror::Error;

/// Errors raised while unwrapping the extraction service's response.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The response contained no `{` to start a JSON object.
    #[error("no JSON object found in extraction response")]
    NoJsonObject,

    /// The JSON starting at the first `{` could not be parsed.
    #[error("extraction response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top-level object has no `questions` key.
    #[error("extraction response has no `questions` key")]
    MissingQuestions,

    /// `questions` (or the document itself) is not an array.
    #[error("`questions` is not a list (found {0})")]
    QuestionsNotList(&'static str),
}
