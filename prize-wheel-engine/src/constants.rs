//! Centralized tuning constants for the prize wheel.
//!
//! These values are the defaults behind [`crate::config::WheelConfig`]. A host
//! may override them through configuration, but the palette and slice
//! geometry are fixed here.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_SPIN_STARTED: &str = "log.spin.started";
pub(crate) const LOG_SPIN_REFUSED: &str = "log.spin.refused";
pub(crate) const LOG_SPIN_SETTLED: &str = "log.spin.settled";
pub(crate) const LOG_OPTION_ADD_REFUSED: &str = "log.option.add-refused";
pub(crate) const LOG_OPTION_REMOVE_REFUSED: &str = "log.option.remove-refused";
pub(crate) const LOG_OPTION_MISSING: &str = "log.option.missing";
pub(crate) const LOG_OPTIONS_EVENED: &str = "log.options.evened";
pub(crate) const LOG_SELECTION_FALLBACK: &str = "log.selection.fallback";

// Option limits ------------------------------------------------------------
/// Number of distinct slice colours; also the default maximum option count.
pub const PALETTE_SIZE: usize = 8;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = PALETTE_SIZE;
/// Maximum characters accepted for an option label.
pub const MAX_LABEL_CHARS: usize = 30;

// Probability validation ---------------------------------------------------
/// Sum of option probabilities required for a spin.
pub const TARGET_TOTAL: f64 = 100.0;
/// Allowed drift around [`TARGET_TOTAL`], in percentage points.
pub const TOTAL_EPSILON: f64 = 0.1;
/// Float slack added to the epsilon comparison.
pub(crate) const TOTAL_COMPARE_SLACK: f64 = 1e-9;

// Spin animation -----------------------------------------------------------
pub const FULL_TURN_DEGREES: f64 = 360.0;
/// Extra rotation added on every spin (five full turns).
pub const EXTRA_SPIN_DEGREES: f64 = 1_800.0;
pub const SPIN_DURATION_MS: u64 = 4_000;
pub const SPIN_EASING: &str = "cubic-bezier(0.15, 0, 0.2, 1)";

// Slice geometry -----------------------------------------------------------
pub const VIEWBOX_CENTER: f64 = 50.0;
pub const WHEEL_RADIUS: f64 = 50.0;
pub const LABEL_RADIUS: f64 = 32.0;

pub const PALETTE: [&str; PALETTE_SIZE] = [
    "#06AEEF", "#53458D", "#16094A", "#75D0F2", "#A1B8F0", "#EC4899", "#F97316", "#06B6D4",
];

// Display strings ----------------------------------------------------------
pub const HEADLINE_READY: &str = "Ready to Spin";
pub const HEADLINE_TRY_AGAIN: &str = "Try Again";
/// Winner text that is announced as a miss rather than a prize.
pub const TRY_AGAIN_LABEL: &str = "try again";
