//! The `quizguard compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizguard_core::drift::compare_captures;
use quizguard_core::normalizer::into_records;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_drift: bool,
) -> Result<()> {
    let baseline = into_records(super::load_records(&baseline_path)?);
    let current = into_records(super::load_records(&current_path)?);

    let report = compare_captures(&baseline, &current);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} changed, {} added, {} removed",
                report.changed.len(),
                report.added,
                report.removed
            );
            println!(
                "Checksum: {} -> {} ({} -> {} records)",
                report.baseline_checksum,
                report.current_checksum,
                report.baseline_count,
                report.current_count
            );

            if !report.changed.is_empty() {
                println!("\nChanged:");
                for c in &report.changed {
                    println!(
                        "  question {} {} -> {} ({})",
                        c.question_index,
                        c.baseline_checksum,
                        c.current_checksum,
                        if c.answer_only { "answer moved" } else { "content changed" }
                    );
                }
            }

            if !report.has_drift() {
                println!("\nNo drift detected.");
            }
        }
    }

    if fail_on_drift && report.has_drift() {
        std::process::exit(1);
    }

    Ok(())
}
