//! Volatility indicators: True Range, ATR, Bollinger Bands.

use super::rolling::{rolling_mean, rolling_std};
use crate::core::error::{ensure_aligned, FinliteError};
use crate::core::reading::{combine, MISSING};
use crate::core::Result;

/// True Range calculation (single bar).
#[inline]
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// True Range for every bar.
///
/// The first bar has no previous close and is missing, as is any bar with a
/// missing input.
pub fn true_range_series(high: &[f64], low: &[f64], close: &[f64]) -> Result<Vec<f64>> {
    let n = close.len();
    ensure_aligned(n, &[high, low])?;

    let mut tr = vec![MISSING; n];
    for i in 1..n {
        if high[i].is_nan() || low[i].is_nan() || close[i - 1].is_nan() {
            continue;
        }
        tr[i] = true_range(high[i], low[i], close[i - 1]);
    }
    Ok(tr)
}

/// Average True Range (ATR).
///
/// Simple trailing mean of the true range.
///
/// # Arguments
/// * `high` - High prices
/// * `low` - Low prices
/// * `close` - Close prices
/// * `period` - Lookback period (default: 14)
///
/// # Returns
/// Vector of ATR values (NaN for warmup period; first valid at index `period`)
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(FinliteError::invalid_parameter("ATR period must be > 0"));
    }
    let tr = true_range_series(high, low, close)?;
    rolling_mean(&tr, period)
}

/// Bollinger Bands result.
#[derive(Debug, Clone)]
pub struct BollingerBandsResult {
    /// Middle band (SMA).
    pub middle: Vec<f64>,
    /// Upper band (SMA + std_dev * multiplier).
    pub upper: Vec<f64>,
    /// Lower band (SMA - std_dev * multiplier).
    pub lower: Vec<f64>,
}

/// Bollinger Bands.
///
/// Uses the population standard deviation of the window.
///
/// # Arguments
/// * `data` - Price data (typically close prices)
/// * `period` - Lookback period (default: 20)
/// * `std_dev` - Standard deviation multiplier (default: 2.0)
pub fn bollinger_bands(data: &[f64], period: usize, std_dev: f64) -> Result<BollingerBandsResult> {
    if period == 0 {
        return Err(FinliteError::invalid_parameter(
            "Bollinger Bands period must be > 0",
        ));
    }
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(FinliteError::invalid_parameter(
            "Bollinger Bands std_dev must be finite and >= 0",
        ));
    }

    let middle = rolling_mean(data, period)?;
    let sigma = rolling_std(data, period, 0)?;

    let upper = middle
        .iter()
        .zip(&sigma)
        .map(|(&m, &s)| combine(m, s, |m, s| m + std_dev * s))
        .collect();
    let lower = middle
        .iter()
        .zip(&sigma)
        .map(|(&m, &s)| combine(m, s, |m, s| m - std_dev * s))
        .collect();

    Ok(BollingerBandsResult {
        middle,
        upper,
        lower,
    })
}
