//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a slice count or index to f64 in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    // i64::MAX is not representable; the clamp lands one past it
    cast::<f64, i64>(clamped).unwrap_or(if clamped > 0.0 { i64::MAX } else { i64::MIN })
}

/// Round to one decimal place, the precision used for evened probabilities.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Weight contributed by a stored probability: negatives and non-finite values count as zero.
#[must_use]
pub fn effective_weight(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Normalize an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(value: f64) -> f64 {
    let wrapped = value.rem_euclid(crate::constants::FULL_TURN_DEGREES);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= crate::constants::FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}
