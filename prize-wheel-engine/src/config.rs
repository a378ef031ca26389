//! Wheel configuration with serde defaults backed by [`crate::constants`].
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    EXTRA_SPIN_DEGREES, MAX_LABEL_CHARS, MAX_OPTIONS, MIN_OPTIONS, PALETTE_SIZE,
    SPIN_DURATION_MS, TARGET_TOTAL, TOTAL_COMPARE_SLACK, TOTAL_EPSILON,
};

/// Errors raised when wheel configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum WheelConfigError {
    #[error("minimum options {min} must be at least 2")]
    MinOptionsTooSmall { min: usize },
    #[error("minimum options {min} exceeds maximum {max}")]
    MinExceedsMax { min: usize, max: usize },
    #[error("maximum options {max} exceeds the {palette} available slice colours")]
    MaxExceedsPalette { max: usize, palette: usize },
    #[error("{field} must be finite and positive (got {value:.3})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("spin duration must be non-zero")]
    ZeroDuration,
    #[error("label limit must allow at least one character")]
    ZeroLabelLimit,
    #[error("invalid wheel config JSON: {0}")]
    Parse(String),
}

/// Tunable wheel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "WheelConfig::default_min_options")]
    pub min_options: usize,
    #[serde(default = "WheelConfig::default_max_options")]
    pub max_options: usize,
    #[serde(default = "WheelConfig::default_extra_spin_degrees")]
    pub extra_spin_degrees: f64,
    #[serde(default = "WheelConfig::default_spin_duration_ms")]
    pub spin_duration_ms: u64,
    #[serde(default = "WheelConfig::default_target_total")]
    pub target_total: f64,
    #[serde(default = "WheelConfig::default_total_epsilon")]
    pub total_epsilon: f64,
    #[serde(default = "WheelConfig::default_max_label_chars")]
    pub max_label_chars: usize,
}

impl WheelConfig {
    const fn default_min_options() -> usize {
        MIN_OPTIONS
    }

    const fn default_max_options() -> usize {
        MAX_OPTIONS
    }

    const fn default_extra_spin_degrees() -> f64 {
        EXTRA_SPIN_DEGREES
    }

    const fn default_spin_duration_ms() -> u64 {
        SPIN_DURATION_MS
    }

    const fn default_target_total() -> f64 {
        TARGET_TOTAL
    }

    const fn default_total_epsilon() -> f64 {
        TOTAL_EPSILON
    }

    const fn default_max_label_chars() -> usize {
        MAX_LABEL_CHARS
    }

    /// Parse a config from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values violate
    /// [`WheelConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, WheelConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| WheelConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the option limits, spin tuning and validity window.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), WheelConfigError> {
        if self.min_options < 2 {
            return Err(WheelConfigError::MinOptionsTooSmall {
                min: self.min_options,
            });
        }
        if self.min_options > self.max_options {
            return Err(WheelConfigError::MinExceedsMax {
                min: self.min_options,
                max: self.max_options,
            });
        }
        if self.max_options > PALETTE_SIZE {
            return Err(WheelConfigError::MaxExceedsPalette {
                max: self.max_options,
                palette: PALETTE_SIZE,
            });
        }
        for (field, value) in [
            ("extra_spin_degrees", self.extra_spin_degrees),
            ("target_total", self.target_total),
            ("total_epsilon", self.total_epsilon),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WheelConfigError::NotPositive { field, value });
            }
        }
        if self.spin_duration_ms == 0 {
            return Err(WheelConfigError::ZeroDuration);
        }
        if self.max_label_chars == 0 {
            return Err(WheelConfigError::ZeroLabelLimit);
        }
        Ok(())
    }

    #[must_use]
    pub const fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// Whether `total` sits inside the spin-permitting window.
    ///
    /// The window is inclusive so that tenth-rounded weights such as
    /// `33.3 * 3` (which sums to `99.89999999999999`) are accepted.
    #[must_use]
    pub fn accepts_total(&self, total: f64) -> bool {
        total.is_finite()
            && (total - self.target_total).abs() <= self.total_epsilon + TOTAL_COMPARE_SLACK
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_options: Self::default_min_options(),
            max_options: Self::default_max_options(),
            extra_spin_degrees: Self::default_extra_spin_degrees(),
            spin_duration_ms: Self::default_spin_duration_ms(),
            target_total: Self::default_target_total(),
            total_epsilon: Self::default_total_epsilon(),
            max_label_chars: Self::default_max_label_chars(),
        }
    }
}
