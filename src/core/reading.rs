//! Missing and degenerate value model.
//!
//! Series are plain `Vec<f64>`. Two non-finite values carry meaning:
//! - `NaN` is a missing value (warmup period, missing input).
//! - [`DEGENERATE`] marks a zero-denominator division local to one data point.

use serde::{Serialize, Serializer};

/// Marker emitted where a formula divides by zero.
pub const DEGENERATE: f64 = f64::INFINITY;

/// Missing value (insufficient history or missing input).
pub const MISSING: f64 = f64::NAN;

/// Whether a value is a degenerate marker of either sign.
#[inline]
pub fn is_degenerate(value: f64) -> bool {
    value.is_infinite()
}

/// Divide, emitting [`DEGENERATE`] on a zero denominator.
///
/// Missing operands stay missing.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if numerator.is_nan() || denominator.is_nan() {
        MISSING
    } else if is_degenerate(numerator) || is_degenerate(denominator) || denominator == 0.0 {
        DEGENERATE
    } else {
        numerator / denominator
    }
}

/// Divide, emitting a degenerate marker signed like the numerator on a zero
/// denominator.
///
/// Zero over zero and missing operands are missing.
#[inline]
pub fn signed_ratio(numerator: f64, denominator: f64) -> f64 {
    if numerator.is_nan() || denominator.is_nan() {
        MISSING
    } else if denominator == 0.0 {
        if numerator == 0.0 {
            MISSING
        } else {
            DEGENERATE.copysign(numerator)
        }
    } else {
        numerator / denominator
    }
}

/// Apply `f` to a value unless it is missing or degenerate.
#[inline]
pub fn map_finite(value: f64, f: impl FnOnce(f64) -> f64) -> f64 {
    if value.is_nan() {
        MISSING
    } else if is_degenerate(value) {
        DEGENERATE
    } else {
        f(value)
    }
}

/// Combine two values; missing dominates, then degenerate.
#[inline]
pub fn combine(a: f64, b: f64, f: impl FnOnce(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        MISSING
    } else if is_degenerate(a) || is_degenerate(b) {
        DEGENERATE
    } else {
        f(a, b)
    }
}

/// Classified scalar for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A finite value.
    Value(f64),
    /// Not enough history or missing input.
    Missing,
    /// Zero-denominator division.
    Degenerate,
}

impl Reading {
    /// Classify a raw value.
    pub fn classify(value: f64) -> Self {
        if value.is_nan() {
            Reading::Missing
        } else if is_degenerate(value) {
            Reading::Degenerate
        } else {
            Reading::Value(value)
        }
    }

    /// The finite value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Short placeholder shown instead of a number.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Reading::Value(_) => None,
            Reading::Missing => Some("N/A"),
            Reading::Degenerate => Some("—"),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::classify(value)
    }
}

// Serialized as the number, or null when not finite.
impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}
