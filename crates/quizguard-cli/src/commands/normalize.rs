//! The `quizguard normalize` command.

use std::path::PathBuf;

use anyhow::Result;

use quizguard_core::normalizer::into_records;

pub fn execute(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let records = into_records(super::load_records(&input)?);
    let unresolved = records
        .iter()
        .filter(|r| r.correct_option_index.is_none())
        .count();
    if unresolved > 0 {
        tracing::warn!(unresolved, "records without a derivable correct answer");
    }

    let json = serde_json::to_string_pretty(&records)?;
    super::emit(&json, output.as_deref())
}
