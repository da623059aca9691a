//! Series utilities: trailing windows, EMA, shift/diff, elementwise helpers.
//!
//! Every windowed statistic uses a trailing window and is strict: positions
//! before the window is full, or whose window holds a missing value, are `NaN`.

use crate::core::error::FinliteError;
use crate::core::reading::{combine, is_degenerate, DEGENERATE, MISSING};
use crate::core::Result;

/// Apply `f` to every complete trailing window.
fn rolling_apply<F>(data: &[f64], period: usize, f: F) -> Result<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if period == 0 {
        return Err(FinliteError::invalid_parameter("period must be at least 1"));
    }

    let n = data.len();
    let mut result = vec![MISSING; n];

    for i in (period - 1)..n {
        let window = &data[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = if window.iter().any(|v| is_degenerate(*v)) {
            DEGENERATE
        } else {
            f(window)
        };
    }

    Ok(result)
}

fn mean_of(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Rolling sum.
pub fn rolling_sum(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_apply(data, period, |w| w.iter().sum())
}

/// Rolling arithmetic mean (simple moving average).
pub fn rolling_mean(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_apply(data, period, mean_of)
}

/// Rolling standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 0` is the population deviation, `ddof = 1` the sample deviation.
pub fn rolling_std(data: &[f64], period: usize, ddof: usize) -> Result<Vec<f64>> {
    if ddof >= period {
        return Err(FinliteError::invalid_parameter(
            "ddof must be smaller than period",
        ));
    }
    rolling_apply(data, period, |w| {
        let mean = mean_of(w);
        let ss: f64 = w.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (w.len() - ddof) as f64).sqrt()
    })
}

/// Rolling mean absolute deviation around the window mean.
pub fn rolling_mean_abs_dev(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_apply(data, period, |w| {
        let mean = mean_of(w);
        w.iter().map(|x| (x - mean).abs()).sum::<f64>() / w.len() as f64
    })
}

/// Calculate rolling minimum (Lowest Low Value) over a period.
pub fn rolling_min(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_apply(data, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Calculate rolling maximum (Highest High Value) over a period.
pub fn rolling_max(data: &[f64], period: usize) -> Result<Vec<f64>> {
    rolling_apply(data, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// Recursive form without bias adjustment, seeded by the first non-missing
/// value. A missing or degenerate input is passed through at its position and
/// the smoothing state carries over to the next valid input.
pub fn ema(data: &[f64], span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(FinliteError::invalid_parameter("EMA span must be > 0"));
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut state: Option<f64> = None;

    let result = data
        .iter()
        .map(|&x| {
            if x.is_nan() || is_degenerate(x) {
                return x;
            }
            let next = match state {
                None => x,
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
            };
            state = Some(next);
            next
        })
        .collect();

    Ok(result)
}

/// Shift values by `periods` positions (positive = forward/lag), filling with `NaN`.
///
/// With a positive shift the value computed at bar `i` lands at bar `i + periods`.
pub fn shift(data: &[f64], periods: isize) -> Vec<f64> {
    let n = data.len();
    let mut result = vec![MISSING; n];
    let k = periods.unsigned_abs();
    if k >= n {
        return result;
    }

    if periods >= 0 {
        result[k..].copy_from_slice(&data[..n - k]);
    } else {
        result[..n - k].copy_from_slice(&data[k..]);
    }
    result
}

/// Difference from the previous value; the first position is missing.
pub fn diff(data: &[f64]) -> Vec<f64> {
    let mut result = vec![MISSING; data.len()];
    for i in 1..data.len() {
        result[i] = combine(data[i], data[i - 1], |a, b| a - b);
    }
    result
}

/// Elementwise absolute value.
pub fn abs(data: &[f64]) -> Vec<f64> {
    data.iter().map(|v| v.abs()).collect()
}

fn check_bounds(lo: f64, hi: f64) -> Result<()> {
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return Err(FinliteError::invalid_parameter(format!(
            "clip bounds must be ordered and not NaN, got [{lo}, {hi}]"
        )));
    }
    Ok(())
}

/// Clip a value into `[lo, hi]`; `NaN` stays `NaN`.
#[inline]
pub fn clip(value: f64, lo: f64, hi: f64) -> Result<f64> {
    check_bounds(lo, hi)?;
    Ok(value.clamp(lo, hi))
}

/// Elementwise [`clip`].
pub fn clip_all(data: &[f64], lo: f64, hi: f64) -> Result<Vec<f64>> {
    check_bounds(lo, hi)?;
    Ok(data.iter().map(|&v| v.clamp(lo, hi)).collect())
}
