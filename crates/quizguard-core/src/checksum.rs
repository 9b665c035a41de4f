//! Short content digests for drift detection.
//!
//! All checksums are the first 8 lowercase hex characters of a SHA-256
//! digest. They detect accidental change between two captures of the same
//! data; they are not a security boundary.

use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::model::CanonicalRecord;

/// Number of hex characters kept from the full digest.
pub const CHECKSUM_LEN: usize = 8;

/// Digest arbitrary bytes into a checksum string.
pub fn digest(data: &[u8]) -> String {
    hex_prefix(&Sha256::digest(data))
}

fn hex_prefix(hash: &[u8]) -> String {
    let mut out = String::with_capacity(CHECKSUM_LEN);
    for b in hash.iter().take(CHECKSUM_LEN / 2) {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

/// Checksum of free text, e.g. the source document.
pub fn text_checksum(text: &str) -> String {
    digest(text.as_bytes())
}

/// Checksum of one record's content: the question text followed by the
/// JSON serialization of its options.
pub fn record_checksum(question_text: &str, options: &[String]) -> String {
    let serialized = serde_json::to_string(options).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(question_text.as_bytes());
    hasher.update(serialized.as_bytes());
    hex_prefix(&hasher.finalize())
}

/// Checksum over a whole record collection, in order.
pub fn collection_checksum<'a>(records: impl IntoIterator<Item = &'a CanonicalRecord>) -> String {
    let content: Vec<_> = records.into_iter().map(CanonicalRecord::content).collect();
    let serialized = serde_json::to_string(&content).unwrap_or_default();
    digest(serialized.as_bytes())
}
