//! The `quizguard arrange` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizguard_core::normalizer::into_records;
use quizguard_core::shuffle::{arrange, arrange_with, PresentationMode};

pub fn execute(input: PathBuf, mode: String, seed: Option<u64>) -> Result<()> {
    let records = into_records(super::load_records(&input)?);
    let mode = PresentationMode::from_label(&mode);

    let arrangement = match seed {
        Some(seed) => arrange_with(&records, mode, &mut StdRng::seed_from_u64(seed)),
        None => arrange(&records, mode),
    };

    println!("{}", serde_json::to_string_pretty(&arrangement)?);
    Ok(())
}
