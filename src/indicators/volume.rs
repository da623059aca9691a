//! Volume indicators: OBV, Accumulation/Distribution, Chaikin Oscillator.

use super::rolling::ema;
use crate::core::error::{ensure_aligned, FinliteError};
use crate::core::reading::{combine, is_degenerate, ratio, DEGENERATE, MISSING};
use crate::core::Result;

/// On Balance Volume (OBV).
///
/// Running total of volume signed by the close-to-close direction. The first
/// bar contributes nothing. A bar with a missing close, previous close or
/// volume is reported as missing and the total carries over unchanged.
///
/// # Arguments
/// * `close` - Close prices
/// * `volume` - Volume data
pub fn obv(close: &[f64], volume: &[f64]) -> Result<Vec<f64>> {
    let n = close.len();
    ensure_aligned(n, &[volume])?;

    if n == 0 {
        return Ok(vec![]);
    }

    let mut result = vec![MISSING; n];
    let mut total = 0.0;
    result[0] = total;

    for i in 1..n {
        let (curr, prev, vol) = (close[i], close[i - 1], volume[i]);
        if curr.is_nan() || prev.is_nan() || vol.is_nan() {
            continue;
        }
        if curr > prev {
            total += vol;
        } else if curr < prev {
            total -= vol;
        }
        result[i] = total;
    }

    Ok(result)
}

/// Accumulation/Distribution Line.
///
/// Running total of `((2C - H - L) / (H - L)) * V`. A bar with zero range is
/// reported as degenerate and a bar with missing input as missing; neither
/// contributes to the running total.
pub fn ad_line(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Result<Vec<f64>> {
    let n = close.len();
    ensure_aligned(n, &[high, low, volume])?;

    let mut result = vec![MISSING; n];
    let mut total = 0.0;

    for i in 0..n {
        let location = combine(close[i], high[i], |c, h| 2.0 * c - h);
        let location = combine(location, low[i], |x, l| x - l);
        let range = combine(high[i], low[i], |h, l| h - l);
        let flow = combine(ratio(location, range), volume[i], |m, v| m * v);

        if flow.is_nan() {
            continue;
        }
        if is_degenerate(flow) {
            result[i] = DEGENERATE;
            continue;
        }
        total += flow;
        result[i] = total;
    }

    Ok(result)
}

/// Chaikin Oscillator: `EMA(AD, fast) - EMA(AD, slow)`.
///
/// # Arguments
/// * `fast` - Fast EMA span (default: 3)
/// * `slow` - Slow EMA span (default: 10)
pub fn chaikin_oscillator(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    fast: usize,
    slow: usize,
) -> Result<Vec<f64>> {
    if fast == 0 || slow == 0 {
        return Err(FinliteError::invalid_parameter("Chaikin spans must be > 0"));
    }

    let ad = ad_line(high, low, close, volume)?;
    let fast_ema = ema(&ad, fast)?;
    let slow_ema = ema(&ad, slow)?;

    Ok(fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(&f, &s)| combine(f, s, |f, s| f - s))
        .collect())
}
