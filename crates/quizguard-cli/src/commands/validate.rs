//! The `quizguard validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizguard_core::config::load_config_from;
use quizguard_core::model::Issue;
use quizguard_core::report::{create_integrity_report, IntegrityReport};

pub fn execute(
    input: PathBuf,
    source: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    fail_on_issues: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut records = super::load_records(&input)?;

    let source_text = source
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source text from {}", path.display()))
        })
        .transpose()?;

    let report = create_integrity_report(&mut records, source_text.as_deref(), &config);

    if format == "sarif" {
        let artifact = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| quizguard_report::sarif::DEFAULT_ARTIFACT.to_string());
        match &output {
            Some(path) => {
                quizguard_report::write_sarif_report(&report, &artifact, path)?;
                eprintln!("Wrote {}", path.display());
            }
            None => println!(
                "{}",
                serde_json::to_string_pretty(&quizguard_report::generate_sarif(&report, &artifact))?
            ),
        }
    } else {
        let rendered = match format.as_str() {
            "json" => serde_json::to_string_pretty(&report)?,
            "markdown" | "md" => quizguard_report::to_markdown(&report),
            _ => render_text(&report),
        };
        super::emit(&rendered, output.as_deref())?;
    }

    if fail_on_issues && !report.validation.passed {
        std::process::exit(1);
    }

    Ok(())
}

fn issue_table(issues: &[Issue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Type", "Severity", "Message"]);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.record_index),
            Cell::new(issue.kind),
            Cell::new(issue.severity),
            Cell::new(&issue.message),
        ]);
    }
    table
}

fn render_text(report: &IntegrityReport) -> String {
    let v = &report.validation;
    let mut out = String::new();

    out.push_str(&format!(
        "Records: {} | Checksum: {} | {}\n",
        report.total_questions,
        report.checksum,
        if v.passed { "PASSED" } else { "FAILED" }
    ));
    if let Some(source) = &v.source_checksum {
        out.push_str(&format!(
            "Source: {} characters | Checksum: {}\n",
            report.original_text_length, source
        ));
    }

    if !v.issues.is_empty() {
        out.push_str(&format!("\n{} issue(s):\n{}\n", v.issues.len(), issue_table(&v.issues)));
    }
    if !v.warnings.is_empty() {
        out.push_str(&format!(
            "\n{} warning(s):\n{}\n",
            v.warnings.len(),
            issue_table(&v.warnings)
        ));
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for r in &report.recommendations {
            out.push_str(&format!("  - {r}\n"));
        }
    }

    out
}
