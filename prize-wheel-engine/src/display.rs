//! Read-side snapshot handed to the rendering layer.
use rand::RngCore;
use serde::Serialize;

use crate::constants::{HEADLINE_READY, HEADLINE_TRY_AGAIN, SPIN_EASING, TRY_AGAIN_LABEL};
use crate::engine::SpinEngine;
use crate::geometry::{SliceGeometry, wheel_geometry};
use crate::options::PrizeOption;

/// CSS-style transition to apply while the wheel turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinTransition {
    pub duration_ms: u64,
    pub easing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelView {
    pub rotation_degrees: f64,
    pub is_spinning: bool,
    pub winner: Option<PrizeOption>,
    pub headline: String,
    pub total: f64,
    pub rounded_total: i64,
    pub is_valid_total: bool,
    /// Fill of the total meter, in percent.
    pub total_meter_percent: f64,
    pub warning: Option<String>,
    pub spin_enabled: bool,
    pub can_add: bool,
    pub can_remove: bool,
    pub transition: Option<SpinTransition>,
    pub slices: Vec<SliceGeometry>,
}

/// Announcement for the settled winner, or the idle prompt.
#[must_use]
pub fn winner_headline(winner: Option<&PrizeOption>) -> String {
    match winner {
        None => HEADLINE_READY.to_string(),
        Some(option) if option.text.eq_ignore_ascii_case(TRY_AGAIN_LABEL) => {
            HEADLINE_TRY_AGAIN.to_string()
        }
        Some(option) => format!("You won: {}", option.text),
    }
}

#[must_use]
pub fn total_warning(rounded_total: i64) -> String {
    format!("Total probability must equal 100% (Current: {rounded_total}%)")
}

impl<R: RngCore> SpinEngine<R> {
    #[must_use]
    pub fn view(&self) -> WheelView {
        let store = self.store();
        let validity = store.validity();
        let state = self.state();
        let transition = state.is_spinning.then(|| SpinTransition {
            duration_ms: self.config().spin_duration_ms,
            easing: SPIN_EASING,
        });
        WheelView {
            rotation_degrees: state.rotation_degrees,
            is_spinning: state.is_spinning,
            winner: state.winner.clone(),
            headline: winner_headline(state.winner.as_ref()),
            total: validity.total,
            rounded_total: validity.rounded_total,
            is_valid_total: validity.is_valid,
            total_meter_percent: validity.total.clamp(0.0, 100.0),
            warning: (!validity.is_valid).then(|| total_warning(validity.rounded_total)),
            spin_enabled: self.can_spin(),
            can_add: store.can_add(),
            can_remove: store.can_remove(),
            transition,
            slices: wheel_geometry(store.len()),
        }
    }
}
