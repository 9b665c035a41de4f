//! Normalization, integrity validation and shuffling of quiz records.
//!
//! This crate defines the canonical quiz record model and the pure
//! transformations the rest of quizguard builds on: every raw record that
//! goes in comes out again, annotated rather than filtered.

pub mod checksum;
pub mod config;
pub mod drift;
pub mod envelope;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod shuffle;
pub mod validator;
