//! Weighted winner selection.
//!
//! A single uniform draw `r` in `[0, total)` is taken from the injected RNG and
//! the option list is walked with a running sum; the first option with a
//! positive weight whose cumulative weight reaches `r` wins.
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{LOG_SELECTION_FALLBACK, PALETTE_SIZE};
use crate::numbers::effective_weight;
use crate::options::PrizeOption;

/// Candidate weight telemetry captured during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    pub id: u32,
    pub weight: f64,
    /// Running sum up to and including this candidate.
    pub cumulative: f64,
}

/// Record of one weighted pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionTrace {
    /// Scaled draw in `[0, total)`.
    pub roll: f64,
    pub total: f64,
    pub candidates: SmallVec<[WeightedCandidate; PALETTE_SIZE]>,
    pub chosen_id: u32,
    /// Set when float drift left no candidate at or above the roll.
    pub fell_back: bool,
}

/// Selected slice index plus its trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub index: usize,
    pub trace: SelectionTrace,
}

/// Resolve a fixed draw against `weights`.
///
/// Returns `None` when no weight is positive.
#[must_use]
pub fn select_for_draw(weights: &[f64], draw: f64) -> Option<usize> {
    walk(weights, draw).map(|(index, _)| index)
}

fn walk(weights: &[f64], draw: f64) -> Option<(usize, bool)> {
    let mut cumulative = 0.0_f64;
    let mut last_positive = None;
    for (index, raw) in weights.iter().enumerate() {
        let weight = effective_weight(*raw);
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if cumulative >= draw {
            return Some((index, false));
        }
    }
    last_positive.map(|index| (index, true))
}

/// Pick a winner from `options` using one draw from `rng`.
///
/// Returns `None` without consuming a draw when the total weight is zero.
pub fn select_weighted<R: RngCore>(options: &[PrizeOption], rng: &mut R) -> Option<Selection> {
    let weights: SmallVec<[f64; PALETTE_SIZE]> =
        options.iter().map(PrizeOption::weight).collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }

    let roll = rng.r#gen::<f64>() * total;
    let (index, fell_back) = walk(&weights, roll)?;
    if fell_back {
        log::debug!("{LOG_SELECTION_FALLBACK}: roll={roll} total={total} index={index}");
    }

    let mut cumulative = 0.0_f64;
    let candidates = options
        .iter()
        .zip(weights.iter())
        .map(|(option, weight)| {
            cumulative += weight;
            WeightedCandidate {
                id: option.id,
                weight: *weight,
                cumulative,
            }
        })
        .collect();

    Some(Selection {
        index,
        trace: SelectionTrace {
            roll,
            total,
            candidates,
            chosen_id: options[index].id,
            fell_back,
        },
    })
}
