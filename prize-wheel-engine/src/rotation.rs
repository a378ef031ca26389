//! Rotation planning: map a winning slice to a forward-only wheel angle.
//!
//! The pointer sits at 0°. Slice `i` of `n` spans `[i * s, (i + 1) * s)` with
//! `s = 360 / n`, so rotating the wheel by `-(i * s + s / 2)` brings the
//! slice centre under the pointer. The accumulated rotation is passed in and
//! returned explicitly; nothing here holds state.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::FULL_TURN_DEGREES;
use crate::numbers::{normalize_degrees, usize_to_f64};

#[derive(Debug, Error, PartialEq)]
pub enum RotationError {
    #[error("a wheel needs at least 2 slices to plan a rotation (got {slices})")]
    TooFewSlices { slices: usize },
    #[error("slice index {index} is out of range for {slices} slices")]
    IndexOutOfRange { index: usize, slices: usize },
    #[error("current rotation must be finite (got {prev})")]
    NonFiniteRotation { prev: f64 },
    #[error("extra spin must be finite and non-negative (got {extra})")]
    InvalidExtraSpin { extra: f64 },
}

/// A planned spin from `from` to `to` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    pub from: f64,
    pub to: f64,
    pub slice_angle: f64,
    /// Rotation from 0° that centres the winning slice under the pointer.
    pub target_offset: f64,
}

impl RotationPlan {
    /// Degrees covered by the animation.
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.to - self.from
    }

    /// Final wheel angle in `[0, 360)`.
    #[must_use]
    pub fn landing_angle(&self) -> f64 {
        normalize_degrees(self.to)
    }
}

#[must_use]
pub fn slice_angle(slices: usize) -> f64 {
    FULL_TURN_DEGREES / usize_to_f64(slices)
}

/// Plan the next accumulated rotation for `index` of `slices`.
///
/// # Errors
///
/// Returns an error for fewer than two slices, an out-of-range index, or a
/// non-finite accumulator or extra spin.
pub fn plan_rotation(
    prev: f64,
    index: usize,
    slices: usize,
    extra_spin: f64,
) -> Result<RotationPlan, RotationError> {
    if slices < 2 {
        return Err(RotationError::TooFewSlices { slices });
    }
    if index >= slices {
        return Err(RotationError::IndexOutOfRange { index, slices });
    }
    if !prev.is_finite() {
        return Err(RotationError::NonFiniteRotation { prev });
    }
    if !extra_spin.is_finite() || extra_spin < 0.0 {
        return Err(RotationError::InvalidExtraSpin { extra: extra_spin });
    }

    let slice = slice_angle(slices);
    let target_offset = -usize_to_f64(index).mul_add(slice, slice / 2.0);
    let next_turn = (prev / FULL_TURN_DEGREES).ceil() * FULL_TURN_DEGREES;
    let mut next = next_turn + extra_spin + target_offset;
    // Forward-only; `<=` also covers a zero extra spin landing exactly on `prev`.
    if next <= prev {
        next += FULL_TURN_DEGREES;
    }

    Ok(RotationPlan {
        from: prev,
        to: next,
        slice_angle: slice,
        target_offset,
    })
}

/// Index of the slice whose span covers the pointer at `rotation`.
///
/// Returns `None` for fewer than two slices or a non-finite rotation.
#[must_use]
pub fn slice_under_pointer(rotation: f64, slices: usize) -> Option<usize> {
    if slices < 2 || !rotation.is_finite() {
        return None;
    }
    // The pointer reads the wheel at angle -rotation.
    let wheel_angle = normalize_degrees(-rotation);
    let index = (wheel_angle / slice_angle(slices)).floor();
    let index = num_traits::cast::<f64, usize>(index)?;
    Some(index.min(slices - 1))
}
