//! Answer-preserving presentation ordering.
//!
//! In random mode every record's options are permuted and then the record
//! list itself is permuted, both with an unbiased Fisher-Yates shuffle. The
//! correct option is tracked by carrying its original position through the
//! permutation, so duplicate option texts cannot confuse it.
//!
//! The randomness source is any [`rand::Rng`]. [`arrange`] draws from the
//! thread-local generator, which is seeded from the OS independently per
//! thread; tests pass a seeded `StdRng` to [`arrange_with`].

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::CanonicalRecord;

/// How records are ordered for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Input order, untouched.
    #[default]
    Sequential,
    /// Records and options shuffled.
    Random,
}

impl PresentationMode {
    /// `"random"` (any case, surrounding whitespace ignored) selects random
    /// mode; every other value is sequential.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("random") {
            PresentationMode::Random
        } else {
            PresentationMode::Sequential
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationMode::Sequential => write!(f, "sequential"),
            PresentationMode::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PresentationMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PresentationMode::from_label(s))
    }
}

/// A presentation ordering of a record list.
#[derive(Debug, Clone, Serialize)]
pub struct Arrangement {
    pub mode: PresentationMode,
    /// `order[i]` is the zero-based input position of `records[i]`.
    pub order: Vec<usize>,
    pub records: Vec<CanonicalRecord>,
}

impl Arrangement {
    /// Restore input order, undoing the record-level permutation.
    /// Option order within each record is left as arranged.
    pub fn in_source_order(&self) -> Vec<&CanonicalRecord> {
        let mut pairs: Vec<_> = self.order.iter().zip(&self.records).collect();
        pairs.sort_by_key(|(source, _)| **source);
        pairs.into_iter().map(|(_, record)| record).collect()
    }
}

/// Arrange records using the thread-local random generator.
pub fn arrange(records: &[CanonicalRecord], mode: PresentationMode) -> Arrangement {
    arrange_with(records, mode, &mut rand::thread_rng())
}

/// Arrange records drawing randomness from `rng`. The input is not modified.
pub fn arrange_with<R: Rng + ?Sized>(
    records: &[CanonicalRecord],
    mode: PresentationMode,
    rng: &mut R,
) -> Arrangement {
    if mode == PresentationMode::Sequential {
        return Arrangement {
            mode,
            order: (0..records.len()).collect(),
            records: records.to_vec(),
        };
    }

    let shuffled: Vec<CanonicalRecord> = records
        .iter()
        .map(|record| shuffle_options(record, rng))
        .collect();

    let mut order: Vec<usize> = (0..shuffled.len()).collect();
    order.shuffle(rng);

    let arranged = order.iter().map(|&i| shuffled[i].clone()).collect();
    tracing::debug!(records = records.len(), "arranged records in random order");

    Arrangement {
        mode,
        order,
        records: arranged,
    }
}

/// Permute one record's options, moving the correct index with its option.
pub fn shuffle_options<R: Rng + ?Sized>(record: &CanonicalRecord, rng: &mut R) -> CanonicalRecord {
    if record.options.len() < 2 {
        return record.clone();
    }

    let mut tagged: Vec<(usize, &String)> = record.options.iter().enumerate().collect();
    tagged.shuffle(rng);

    let correct = record
        .correct_option_index
        .and_then(|original| tagged.iter().position(|(i, _)| *i == original));
    let options = tagged.into_iter().map(|(_, text)| text.clone()).collect();

    record.with_options(options, correct)
}
