pub mod arrange;
pub mod compare;
pub mod init;
pub mod normalize;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use quizguard_core::envelope::{parse_extraction_response, records_from_value};
use quizguard_core::normalizer::{normalize_all, NormalizedRecord};

/// Load raw record values from a file.
///
/// Accepts a JSON array, a `{"questions": [...]}` envelope, or an unparsed
/// extraction response with prose around the JSON object.
pub fn load_values(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;

    let values = match serde_json::from_str::<Value>(&content) {
        Ok(value) => records_from_value(value),
        Err(_) => parse_extraction_response(&content),
    }
    .with_context(|| format!("no record list in {}", path.display()))?;

    tracing::debug!(count = values.len(), path = %path.display(), "loaded raw records");
    Ok(values)
}

/// Load and normalize records from a file.
pub fn load_records(path: &Path) -> Result<Vec<NormalizedRecord>> {
    Ok(normalize_all(&load_values(path)?))
}

/// Print to stdout or write to a file.
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
