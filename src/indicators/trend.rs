//! Trend indicators: SMA, EMA, Ichimoku.

use super::rolling::{rolling_max, rolling_mean, rolling_min, shift};
use crate::core::error::{ensure_aligned, FinliteError};
use crate::core::reading::combine;
use crate::core::Result;

pub use super::rolling::ema;

/// Simple Moving Average.
///
/// # Arguments
/// * `data` - Price data
/// * `period` - Lookback period
///
/// # Returns
/// Vector of SMA values (NaN for warmup period)
pub fn sma(data: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(FinliteError::invalid_parameter("SMA period must be > 0"));
    }
    rolling_mean(data, period)
}

/// Ichimoku cloud lines.
#[derive(Debug, Clone)]
pub struct IchimokuResult {
    /// Conversion line: midpoint of the short window.
    pub tenkan: Vec<f64>,
    /// Base line: midpoint of the medium window.
    pub kijun: Vec<f64>,
    /// Leading span A, displaced forward.
    pub senkou_a: Vec<f64>,
    /// Leading span B, displaced forward.
    pub senkou_b: Vec<f64>,
}

fn midpoint(high: &[f64], low: &[f64], period: usize) -> Result<Vec<f64>> {
    let hh = rolling_max(high, period)?;
    let ll = rolling_min(low, period)?;
    Ok(hh
        .iter()
        .zip(&ll)
        .map(|(&h, &l)| combine(h, l, |h, l| (h + l) / 2.0))
        .collect())
}

/// Ichimoku Kinko Hyo.
///
/// # Arguments
/// * `high` - High prices
/// * `low` - Low prices
/// * `tenkan_period` - Conversion line window (default: 9)
/// * `kijun_period` - Base line window (default: 26)
/// * `senkou_b_period` - Leading span B window (default: 52)
///
/// The leading spans are displaced forward by `kijun_period` bars: the value
/// computed at bar `i` is reported at bar `i + kijun_period`. Values that would
/// land past the last bar are dropped so the output stays aligned.
pub fn ichimoku(
    high: &[f64],
    low: &[f64],
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
) -> Result<IchimokuResult> {
    ensure_aligned(high.len(), &[low])?;
    if tenkan_period == 0 || kijun_period == 0 || senkou_b_period == 0 {
        return Err(FinliteError::invalid_parameter(
            "Ichimoku periods must be > 0",
        ));
    }

    let tenkan = midpoint(high, low, tenkan_period)?;
    let kijun = midpoint(high, low, kijun_period)?;

    let span_a: Vec<f64> = tenkan
        .iter()
        .zip(&kijun)
        .map(|(&t, &k)| combine(t, k, |t, k| (t + k) / 2.0))
        .collect();
    let span_b = midpoint(high, low, senkou_b_period)?;

    let displacement = kijun_period as isize;
    Ok(IchimokuResult {
        tenkan,
        kijun,
        senkou_a: shift(&span_a, displacement),
        senkou_b: shift(&span_b, displacement),
    })
}
