//! Option store: the ordered, editable list of prize slices.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::config::{WheelConfig, WheelConfigError};
use crate::constants::{
    LOG_OPTION_ADD_REFUSED, LOG_OPTION_MISSING, LOG_OPTION_REMOVE_REFUSED, LOG_OPTIONS_EVENED,
};
use crate::numbers::{effective_weight, round_f64_to_i64, round_to_tenth, usize_to_f64};

/// A single prize slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeOption {
    pub id: u32,
    pub text: String,
    /// Percentage weight used only for selection odds.
    pub probability: f64,
}

impl PrizeOption {
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>, probability: f64) -> Self {
        Self {
            id,
            text: text.into(),
            probability,
        }
    }

    /// Weight contributed to selection and to the running total.
    #[must_use]
    pub fn weight(&self) -> f64 {
        effective_weight(self.probability)
    }
}

/// Field targeted by an edit coming from the configuration panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    Text,
    Probability,
}

/// A typed in-place edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum OptionUpdate {
    Text(String),
    Probability(f64),
}

impl OptionUpdate {
    /// Build an edit from raw input text, the way a form field delivers it.
    #[must_use]
    pub fn from_input(field: OptionField, raw: &str) -> Self {
        match field {
            OptionField::Text => Self::Text(raw.to_string()),
            OptionField::Probability => Self::Probability(parse_probability(raw)),
        }
    }
}

/// Lenient probability parse: blank, malformed or non-finite input reads as zero.
#[must_use]
pub fn parse_probability(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Errors raised when building a store from an arbitrary option list.
#[derive(Debug, Error, PartialEq)]
pub enum OptionStoreError {
    #[error(transparent)]
    Config(#[from] WheelConfigError),
    #[error("a wheel needs at least {min} options (got {count})")]
    TooFew { min: usize, count: usize },
    #[error("a wheel supports at most {max} options (got {count})")]
    TooMany { max: usize, count: usize },
    #[error("option id {id} appears more than once")]
    DuplicateId { id: u32 },
}

/// Probability total as shown next to the configuration panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalValidity {
    pub total: f64,
    /// Nearest whole percentage, used in the warning text.
    pub rounded_total: i64,
    pub is_valid: bool,
}

/// Ordered option list with count limits enforced on every edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionStore {
    options: Vec<PrizeOption>,
    #[serde(skip)]
    config: WheelConfig,
}

impl OptionStore {
    /// Build a store from `options`, checking count limits and id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, the list is shorter than
    /// `min_options` or longer than `max_options`, or an id repeats.
    pub fn new(options: Vec<PrizeOption>, config: WheelConfig) -> Result<Self, OptionStoreError> {
        config.validate()?;
        let count = options.len();
        if count < config.min_options {
            return Err(OptionStoreError::TooFew {
                min: config.min_options,
                count,
            });
        }
        if count > config.max_options {
            return Err(OptionStoreError::TooMany {
                max: config.max_options,
                count,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        for option in &options {
            if !seen.insert(option.id) {
                return Err(OptionStoreError::DuplicateId { id: option.id });
            }
        }
        let mut store = Self { options, config };
        let limit = store.config.max_label_chars;
        for option in &mut store.options {
            truncate_label(&mut option.text, limit);
        }
        Ok(store)
    }

    /// The stock wheel shipped with the widget.
    #[must_use]
    pub fn default_options() -> Vec<PrizeOption> {
        vec![
            PrizeOption::new(1, "20% Off", 85.0),
            PrizeOption::new(2, "Car Sunshade", 10.0),
            PrizeOption::new(3, "6 Months Free", 5.0),
            PrizeOption::new(4, "Gift Box", 0.0),
            PrizeOption::new(5, "Try Again", 0.0),
        ]
    }

    #[must_use]
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    #[must_use]
    pub fn options(&self) -> &[PrizeOption] {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrizeOption> {
        self.options.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: u32) -> Option<&PrizeOption> {
        self.options.iter().find(|option| option.id == id)
    }

    fn find_mut(&mut self, id: u32) -> Option<&mut PrizeOption> {
        self.options.iter_mut().find(|option| option.id == id)
    }

    #[must_use]
    pub fn can_add(&self) -> bool {
        self.options.len() < self.config.max_options
    }

    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.options.len() > self.config.min_options
    }

    /// Append `Option {id}` with weight 0.
    /// Returns the new id, or `None` when the wheel is already full or the
    /// id space above the current maximum is exhausted.
    pub fn add_option(&mut self) -> Option<u32> {
        if !self.can_add() {
            log::debug!("{LOG_OPTION_ADD_REFUSED}: count={}", self.options.len());
            return None;
        }
        let next = match self.options.iter().map(|option| option.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        let Some(id) = next else {
            log::debug!("{LOG_OPTION_ADD_REFUSED}: id space exhausted");
            return None;
        };
        self.options.push(PrizeOption::new(id, format!("Option {id}"), 0.0));
        Some(id)
    }

    /// Remove the option with `id`.
    /// Returns `false` when at the minimum count or when no option matches.
    pub fn remove_option(&mut self, id: u32) -> bool {
        if !self.can_remove() {
            log::debug!(
                "{LOG_OPTION_REMOVE_REFUSED}: id={id} count={}",
                self.options.len()
            );
            return false;
        }
        let before = self.options.len();
        self.options.retain(|option| option.id != id);
        let removed = self.options.len() != before;
        if !removed {
            log::debug!("{LOG_OPTION_MISSING}: id={id}");
        }
        removed
    }

    /// Apply `update` in place. No total validation happens here.
    /// Returns `false` when no option matches `id`.
    pub fn update_option(&mut self, id: u32, update: OptionUpdate) -> bool {
        let limit = self.config.max_label_chars;
        let Some(option) = self.find_mut(id) else {
            log::debug!("{LOG_OPTION_MISSING}: id={id}");
            return false;
        };
        match update {
            OptionUpdate::Text(mut text) => {
                truncate_label(&mut text, limit);
                option.text = text;
            }
            OptionUpdate::Probability(probability) => option.probability = probability,
        }
        true
    }

    /// Overwrite every weight with `target / n` rounded to one decimal.
    ///
    /// The rounded shares may sum outside the valid window (six options give
    /// `16.7 * 6 = 100.2`); the validity read reports that as usual.
    pub fn even_distribute(&mut self) {
        let count = self.options.len();
        if count == 0 {
            return;
        }
        let share = round_to_tenth(self.config.target_total / usize_to_f64(count));
        for option in &mut self.options {
            option.probability = share;
        }
        log::debug!(
            "{LOG_OPTIONS_EVENED}: count={count} share={share:.1} total={:.1}",
            self.total_probability()
        );
    }

    /// Sum of all effective weights.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.options.iter().map(PrizeOption::weight).sum()
    }

    #[must_use]
    pub fn is_valid_total(&self) -> bool {
        self.config.accepts_total(self.total_probability())
    }

    #[must_use]
    pub fn validity(&self) -> TotalValidity {
        let total = self.total_probability();
        TotalValidity {
            total,
            rounded_total: round_f64_to_i64(total),
            is_valid: self.config.accepts_total(total),
        }
    }

    /// Effective weights in slice order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.options.iter().map(PrizeOption::weight).collect()
    }
}

impl Default for OptionStore {
    fn default() -> Self {
        Self {
            options: Self::default_options(),
            config: WheelConfig::default(),
        }
    }
}

fn truncate_label(text: &mut String, limit: usize) {
    if let Some((byte_idx, _)) = text.char_indices().nth(limit) {
        text.truncate(byte_idx);
    }
}
