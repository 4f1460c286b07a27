//! Thresholds handed explicitly to every analyzer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunable heuristics. Every field has a default, so a thresholds file only
/// needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Followers must exceed following by this factor to flag a reciprocity anomaly.
    pub anomaly_multiplier: f64,
    /// ...and the following count must be below this floor.
    pub anomaly_following_floor: u64,
    /// Follow ratios above this are reported as extreme.
    pub extreme_ratio_ceiling: f64,
    /// Follow ratios below this (with a non-zero following count) look like follow spam.
    pub follow_spam_ratio_floor: f64,
    /// Number of dominant caption themes to keep.
    pub top_themes: usize,
    /// Number of hashtags listed in the behavior summary.
    pub top_hashtags: usize,
    /// Biographies longer than this many characters count as detailed.
    pub detailed_bio_chars: usize,
    /// Posts needed before clustered posting hours count as an automation hint.
    pub automation_min_posts: usize,
    /// At most this many distinct posting hours triggers the automation hint.
    pub automation_max_distinct_hours: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anomaly_multiplier: 50.0,
            anomaly_following_floor: 50,
            extreme_ratio_ceiling: 100.0,
            follow_spam_ratio_floor: 0.1,
            top_themes: 5,
            top_hashtags: 10,
            detailed_bio_chars: 100,
            automation_min_posts: 5,
            automation_max_distinct_hours: 3,
        }
    }
}

impl AnalysisConfig {
    /// Rejects thresholds that would make the analyzers meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.anomaly_multiplier.is_finite() && self.anomaly_multiplier > 0.0) {
            return Err(ConfigError::Validation(format!(
                "anomaly_multiplier must be a positive number, got {}",
                self.anomaly_multiplier
            )));
        }
        if !(self.extreme_ratio_ceiling.is_finite() && self.extreme_ratio_ceiling > 0.0) {
            return Err(ConfigError::Validation(format!(
                "extreme_ratio_ceiling must be a positive number, got {}",
                self.extreme_ratio_ceiling
            )));
        }
        if !(self.follow_spam_ratio_floor.is_finite() && self.follow_spam_ratio_floor >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "follow_spam_ratio_floor must be zero or positive, got {}",
                self.follow_spam_ratio_floor
            )));
        }
        if self.top_themes == 0 {
            return Err(ConfigError::Validation(
                "top_themes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load analysis thresholds, falling back to defaults when no file is given.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_analysis_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ThresholdsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: AnalysisConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
