//! The `quizguard init` command.

use anyhow::Result;

use quizguard_core::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    if std::path::Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE}");
    }

    let records_path = std::path::Path::new("records.json");
    if records_path.exists() {
        println!("records.json already exists, skipping.");
    } else {
        std::fs::write(records_path, SAMPLE_RECORDS)?;
        println!("Created records.json");
    }

    println!("\nNext steps:");
    println!("  1. Adjust thresholds in {CONFIG_FILE}");
    println!("  2. Run: quizguard validate --input records.json");
    println!("  3. Run: quizguard arrange --input records.json --mode random");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizguard configuration

[validator]
# Fewer options than this is an `insufficient_options` issue.
min_options = 2
# Fewer options than this is an `incomplete_options` warning.
recommended_options = 4

[report]
# Fewer questions than this adds a low-count recommendation.
min_expected_questions = 10
"#;

const SAMPLE_RECORDS: &str = r#"{
  "questions": [
    {
      "raw_question": "Which keyword declares an immutable binding in Rust?",
      "raw_options": ["let", "mut", "var", "const fn"],
      "raw_answer": "A"
    },
    {
      "question": "What does this print?\nint main() { printf(\"%d\", 3 / 2); }",
      "options": {"A": "1", "B": "1.5", "C": "2"},
      "answer": "A"
    }
  ]
}
"#;
