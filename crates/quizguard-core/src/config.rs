//! Threshold configuration.
//!
//! Loaded from `quizguard.toml`. Every field has a default, so an empty
//! file (or no file at all) yields the standard thresholds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default file name searched for in the working directory.
pub const CONFIG_FILE: &str = "quizguard.toml";

/// Top-level quizguard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizguardConfig {
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Per-record thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Below this many options a record gets an `insufficient_options` issue.
    #[serde(default = "default_min_options")]
    pub min_options: usize,
    /// Below this many options a record gets an `incomplete_options` warning.
    #[serde(default = "default_recommended_options")]
    pub recommended_options: usize,
}

/// Collection-level recommendation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Fewer records than this triggers a low-count recommendation.
    #[serde(default = "default_min_expected_questions")]
    pub min_expected_questions: usize,
}

fn default_min_options() -> usize {
    2
}
fn default_recommended_options() -> usize {
    4
}
fn default_min_expected_questions() -> usize {
    10
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_options: default_min_options(),
            recommended_options: default_recommended_options(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_expected_questions: default_min_expected_questions(),
        }
    }
}

impl QuizguardConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse quizguard config")
    }
}

/// Load config from an explicit path, or `quizguard.toml` in the current
/// directory, or fall back to defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizguardConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()),
    };

    let Some(config_path) = config_path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(QuizguardConfig::default());
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    let config = QuizguardConfig::from_toml_str(&content)
        .with_context(|| format!("invalid config: {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}
