//! Momentum indicators: RSI, MACD, Stochastic %K, Williams %R, CCI, Ultimate Oscillator.

use super::rolling::{
    diff, ema, rolling_max, rolling_mean, rolling_mean_abs_dev, rolling_min, rolling_sum,
};
use super::volatility::true_range_series;
use crate::core::error::{ensure_aligned, FinliteError};
use crate::core::reading::{combine, map_finite, ratio, MISSING};
use crate::core::Result;

/// Relative Strength Index (RSI).
///
/// Average gain and average loss are simple trailing means of the positive and
/// negative price deltas. The first bar has no delta, so the first value is
/// available at index `period`.
///
/// # Arguments
/// * `data` - Price data (typically close prices)
/// * `period` - Lookback period (default: 14)
///
/// # Returns
/// Vector of RSI values (0-100 scale, NaN for warmup period, degenerate where
/// the average loss is zero)
pub fn rsi(data: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(FinliteError::invalid_parameter("RSI period must be > 0"));
    }

    let delta = diff(data);
    let gains: Vec<f64> = delta.iter().map(|&d| map_finite(d, |d| d.max(0.0))).collect();
    let losses: Vec<f64> = delta.iter().map(|&d| map_finite(d, |d| (-d).max(0.0))).collect();

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    Ok(avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| map_finite(ratio(g, l), |rs| 100.0 - 100.0 / (1.0 + rs)))
        .collect())
}

/// MACD result structure.
#[derive(Debug, Clone)]
pub struct MacdResult {
    /// MACD line (fast EMA - slow EMA).
    pub macd_line: Vec<f64>,
    /// Signal line (EMA of MACD line).
    pub signal_line: Vec<f64>,
    /// Histogram (MACD line - signal line).
    pub histogram: Vec<f64>,
}

/// Moving Average Convergence Divergence (MACD).
///
/// # Arguments
/// * `data` - Price data (typically close prices)
/// * `fast_period` - Fast EMA span (default: 12)
/// * `slow_period` - Slow EMA span (default: 26)
/// * `signal_period` - Signal line EMA span (default: 9)
///
/// # Returns
/// MacdResult with MACD line, signal line, and histogram
pub fn macd(
    data: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdResult> {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return Err(FinliteError::invalid_parameter("MACD periods must be > 0"));
    }
    if fast_period >= slow_period {
        return Err(FinliteError::invalid_parameter(
            "MACD fast period must be < slow period",
        ));
    }

    let fast_ema = ema(data, fast_period)?;
    let slow_ema = ema(data, slow_period)?;

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(&f, &s)| combine(f, s, |f, s| f - s))
        .collect();
    let signal_line = ema(&macd_line, signal_period)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| combine(m, s, |m, s| m - s))
        .collect();

    Ok(MacdResult {
        macd_line,
        signal_line,
        histogram,
    })
}

/// Stochastic Oscillator %K.
///
/// # Arguments
/// * `high` - High prices
/// * `low` - Low prices
/// * `close` - Close prices
/// * `period` - Lookback period (default: 14)
///
/// # Returns
/// %K on a 0-100 scale; degenerate where the window range is zero
pub fn stochastic_k(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_aligned(close.len(), &[high, low])?;
    if period == 0 {
        return Err(FinliteError::invalid_parameter("Stochastic period must be > 0"));
    }

    let highest = rolling_max(high, period)?;
    let lowest = rolling_min(low, period)?;

    Ok((0..close.len())
        .map(|i| {
            let range = combine(highest[i], lowest[i], |h, l| h - l);
            let offset = combine(close[i], lowest[i], |c, l| c - l);
            map_finite(ratio(offset, range), |r| 100.0 * r)
        })
        .collect())
}

/// Williams %R.
///
/// # Returns
/// Values nominally in [-100, 0]; degenerate where the window range is zero
pub fn williams_r(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_aligned(close.len(), &[high, low])?;
    if period == 0 {
        return Err(FinliteError::invalid_parameter("Williams %R period must be > 0"));
    }

    let highest = rolling_max(high, period)?;
    let lowest = rolling_min(low, period)?;

    Ok((0..close.len())
        .map(|i| {
            let range = combine(highest[i], lowest[i], |h, l| h - l);
            let distance = combine(highest[i], close[i], |h, c| h - c);
            map_finite(ratio(distance, range), |r| -100.0 * r)
        })
        .collect())
}

/// Commodity Channel Index (CCI).
///
/// `(typical - SMA(typical)) / (0.015 * mean absolute deviation)` over a
/// trailing window of the typical price `(H + L + C) / 3`.
pub fn cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_aligned(close.len(), &[high, low])?;
    if period == 0 {
        return Err(FinliteError::invalid_parameter("CCI period must be > 0"));
    }

    let typical: Vec<f64> = (0..close.len())
        .map(|i| (high[i] + low[i] + close[i]) / 3.0)
        .collect();
    let mean = rolling_mean(&typical, period)?;
    let mad = rolling_mean_abs_dev(&typical, period)?;

    Ok((0..close.len())
        .map(|i| {
            let deviation = combine(typical[i], mean[i], |t, m| t - m);
            ratio(deviation, map_finite(mad[i], |d| 0.015 * d))
        })
        .collect())
}

/// Ultimate Oscillator.
///
/// Buying pressure is `close - min(low, prev_close)`; true range as in ATR.
/// Each average is `sum(BP, n) / sum(TR, n)` and the oscillator weights them
/// 4:2:1.
///
/// # Arguments
/// * `short`, `medium`, `long` - Window lengths (default: 7, 14, 28)
pub fn ultimate_oscillator(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    short: usize,
    medium: usize,
    long: usize,
) -> Result<Vec<f64>> {
    let n = close.len();
    ensure_aligned(n, &[high, low])?;
    if short == 0 || medium == 0 || long == 0 {
        return Err(FinliteError::invalid_parameter(
            "Ultimate Oscillator windows must be > 0",
        ));
    }

    let mut buying_pressure = vec![MISSING; n];
    for i in 1..n {
        let floor = combine(low[i], close[i - 1], f64::min);
        buying_pressure[i] = combine(close[i], floor, |c, f| c - f);
    }
    let tr = true_range_series(high, low, close)?;

    let average = |window: usize| -> Result<Vec<f64>> {
        let bp_sum = rolling_sum(&buying_pressure, window)?;
        let tr_sum = rolling_sum(&tr, window)?;
        Ok(bp_sum.iter().zip(&tr_sum).map(|(&b, &t)| ratio(b, t)).collect())
    };
    let avg_short = average(short)?;
    let avg_medium = average(medium)?;
    let avg_long = average(long)?;

    Ok((0..n)
        .map(|i| {
            let weighted = combine(avg_short[i], avg_medium[i], |s, m| 4.0 * s + 2.0 * m);
            combine(weighted, avg_long[i], |w, l| 100.0 * (w + l) / 7.0)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reading::is_degenerate;

    #[test]
    fn test_rsi() {
        let data = vec![
            44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 44.0, 44.25, 45.0, 45.5, 46.0, 46.5, 47.0,
            47.5,
        ];
        let result = rsi(&data, 14).unwrap();

        assert_eq!(result.len(), data.len());
        assert!(result[13].is_nan());
        assert!(!result[14].is_nan());
        assert!(result[14] >= 0.0 && result[14] <= 100.0);
    }

    #[test]
    fn test_rsi_known_value() {
        // deltas: +2, -1, +3 -> gain 5/3, loss 1/3, rs 5
        let data = vec![10.0, 12.0, 11.0, 14.0];
        let result = rsi(&data, 3).unwrap();
        assert!((result[3] - (100.0 - 100.0 / 6.0)).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_zero_loss_is_degenerate() {
        let data: Vec<f64> = (0..20).map(|x| x as f64).collect();
        let result = rsi(&data, 14).unwrap();
        assert!(is_degenerate(result[19]));
    }

    #[test]
    fn test_macd() {
        let data: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        let result = macd(&data, 12, 26, 9).unwrap();

        // EMA seeded by the first value: everything starts at zero spread
        assert_eq!(result.macd_line[0], 0.0);
        assert_eq!(result.signal_line[0], 0.0);
        // Rising prices: fast EMA above slow EMA
        assert!(result.macd_line[49] > 0.0);
        let expected = result.macd_line[49] - result.signal_line[49];
        assert!((result.histogram[49] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_macd_invalid_periods() {
        let data = vec![1.0; 10];
        assert!(macd(&data, 26, 12, 9).is_err());
        assert!(macd(&data, 0, 12, 9).is_err());
    }

    #[test]
    fn test_stochastic_k() {
        let high = vec![50.0, 51.0, 52.0, 51.5, 50.5, 51.0, 52.0, 53.0, 52.5, 51.5];
        let low = vec![48.0, 49.0, 50.0, 49.5, 48.5, 49.0, 50.0, 51.0, 50.5, 49.5];
        let close = vec![49.0, 50.0, 51.0, 50.0, 49.0, 50.0, 51.0, 52.0, 51.0, 50.0];

        let result = stochastic_k(&high, &low, &close, 5).unwrap();

        assert!(result[3].is_nan());
        // window 0..=4: high 52, low 48, close 49 -> 25
        assert!((result[4] - 25.0).abs() < 1e-10);
        for &k in &result[4..] {
            assert!((0.0..=100.0).contains(&k));
        }
    }

    #[test]
    fn test_stochastic_zero_range() {
        let flat = vec![10.0; 6];
        let result = stochastic_k(&flat, &flat, &flat, 3).unwrap();
        assert!(result[1].is_nan());
        assert!(is_degenerate(result[2]));
    }

    #[test]
    fn test_williams_r() {
        let high = vec![10.0, 12.0, 11.0];
        let low = vec![8.0, 9.0, 9.5];
        let close = vec![9.0, 11.0, 10.0];
        let result = williams_r(&high, &low, &close, 3).unwrap();
        // (12 - 10) / (12 - 8) = 0.5
        assert!((result[2] + 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_cci() {
        let high = vec![3.0, 4.0, 5.0, 9.0];
        let low = vec![1.0, 2.0, 3.0, 7.0];
        let close = vec![2.0, 3.0, 4.0, 8.0];
        // typical = 2, 3, 4, 8 ; window 4 mean 4.25, mad = (2.25+1.25+0.25+3.75)/4 = 1.875
        let result = cci(&high, &low, &close, 4).unwrap();
        assert!(result[2].is_nan());
        let expected = (8.0 - 4.25) / (0.015 * 1.875);
        assert!((result[3] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cci_constant_is_degenerate() {
        let flat = vec![5.0; 4];
        let result = cci(&flat, &flat, &flat, 3).unwrap();
        assert!(is_degenerate(result[3]));
    }

    #[test]
    fn test_ultimate_oscillator_warmup() {
        let n = 40;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();

        let result = ultimate_oscillator(&high, &low, &close, 7, 14, 28).unwrap();
        assert!(result[27].is_nan());
        assert!(!result[28].is_nan());
        for &v in &result[28..] {
            assert!((0.0..=100.0).contains(&v));
        }
    }
}
