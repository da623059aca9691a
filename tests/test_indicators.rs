//! Integration tests for FinLite indicators.

use finlite::core::{is_degenerate, OhlcvData, Reading};
use finlite::indicators::momentum::{cci, macd, rsi, stochastic_k, ultimate_oscillator, williams_r};
use finlite::indicators::rolling::ema;
use finlite::indicators::trend::{ichimoku, sma};
use finlite::indicators::volatility::{atr, bollinger_bands};
use finlite::indicators::volume::{chaikin_oscillator, obv};
use finlite::indicators::{IndicatorParams, TechnicalFrame};
use proptest::prelude::*;

fn sample_ohlcv() -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    // Create sample OHLCV data with 60 bars
    let n = 60;
    let mut close: Vec<f64> = vec![100.0];
    let mut high: Vec<f64> = vec![101.0];
    let mut low: Vec<f64> = vec![99.0];
    let mut open: Vec<f64> = vec![100.0];
    let volume: Vec<f64> = (0..n).map(|i| 1000.0 + (i % 7) as f64 * 50.0).collect();

    // Generate trending data
    for i in 1..n {
        let prev_close = close[i - 1];
        let change = ((i as f64 * 0.2).sin() * 2.0) + 0.5; // Slight uptrend with oscillation
        let new_close = prev_close + change;
        close.push(new_close);
        open.push(prev_close);
        high.push(new_close.max(prev_close) + 0.5);
        low.push(new_close.min(prev_close) - 0.5);
    }

    (open, high, low, close, volume)
}

fn assert_in_range(name: &str, values: &[f64], lo: f64, hi: f64) {
    for (i, &value) in values.iter().enumerate() {
        if value.is_finite() {
            assert!(
                value >= lo && value <= hi,
                "{} at index {} is out of range: {}",
                name,
                i,
                value
            );
        }
    }
}

#[test]
fn test_sma_correctness() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let result = sma(&data, 3).unwrap();

    assert!(result[0].is_nan());
    assert!(result[1].is_nan());
    assert!((result[2] - 2.0).abs() < 1e-10);
    assert!((result[9] - 9.0).abs() < 1e-10);
}

#[test]
fn test_ema_recursive_form() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let result = ema(&data, 3).unwrap();

    let alpha = 0.5;
    let mut expected = data[0];
    for (i, &x) in data.iter().enumerate() {
        if i > 0 {
            expected = alpha * x + (1.0 - alpha) * expected;
        }
        assert!((result[i] - expected).abs() < 1e-12);
    }
}

#[test]
fn test_rsi_range() {
    let (_, _, _, close, _) = sample_ohlcv();
    let result = rsi(&close, 14).unwrap();

    assert!(result[..14].iter().all(|v| v.is_nan()));
    assert_in_range("RSI", &result, 0.0, 100.0);
}

#[test]
fn test_macd_structure() {
    let (_, _, _, close, _) = sample_ohlcv();
    let result = macd(&close, 12, 26, 9).unwrap();

    assert_eq!(result.macd_line.len(), close.len());
    assert_eq!(result.signal_line.len(), close.len());
    assert_eq!(result.histogram.len(), close.len());
    assert!(result.macd_line.iter().all(|v| v.is_finite()));
}

#[test]
fn test_stochastic_and_williams_are_mirrors() {
    let (_, high, low, close, _) = sample_ohlcv();
    let k = stochastic_k(&high, &low, &close, 14).unwrap();
    let r = williams_r(&high, &low, &close, 14).unwrap();

    assert_in_range("%K", &k, 0.0, 100.0);
    assert_in_range("%R", &r, -100.0, 0.0);
    for i in 13..close.len() {
        // %R = %K - 100 over the same window
        assert!((r[i] - (k[i] - 100.0)).abs() < 1e-9);
    }
}

#[test]
fn test_atr_positive() {
    let (_, high, low, close, _) = sample_ohlcv();
    let result = atr(&high, &low, &close, 14).unwrap();

    assert!(result[13].is_nan());
    for (i, &value) in result.iter().enumerate().skip(14) {
        assert!(value > 0.0, "ATR at index {} is not positive: {}", i, value);
    }
}

#[test]
fn test_bollinger_bands_ordering() {
    let (_, _, _, close, _) = sample_ohlcv();
    let result = bollinger_bands(&close, 20, 2.0).unwrap();

    for i in 19..close.len() {
        assert!(result.upper[i] >= result.middle[i]);
        assert!(result.middle[i] >= result.lower[i]);
    }
}

#[test]
fn test_bollinger_constant_series() {
    let close = vec![50.0; 30];
    let result = bollinger_bands(&close, 20, 2.0).unwrap();

    assert!(result.middle[18].is_nan());
    for i in 19..30 {
        assert_eq!(result.upper[i], result.middle[i]);
        assert_eq!(result.lower[i], result.middle[i]);
    }
}

#[test]
fn test_cci_and_uo_warmup() {
    let (_, high, low, close, _) = sample_ohlcv();
    let c = cci(&high, &low, &close, 20).unwrap();
    assert!(c[18].is_nan());
    assert!(c[19].is_finite());

    let uo = ultimate_oscillator(&high, &low, &close, 7, 14, 28).unwrap();
    assert!(uo[27].is_nan());
    assert_in_range("UO", &uo, 0.0, 100.0);
}

#[test]
fn test_obv_and_chaikin() {
    let (_, high, low, close, volume) = sample_ohlcv();
    let o = obv(&close, &volume).unwrap();
    assert_eq!(o[0], 0.0);
    assert!(o.iter().all(|v| v.is_finite()));

    let ch = chaikin_oscillator(&high, &low, &close, &volume, 3, 10).unwrap();
    assert_eq!(ch.len(), close.len());
    assert!(ch.iter().all(|v| v.is_finite()));
}

#[test]
fn test_ichimoku_alignment() {
    let (_, high, low, _, _) = sample_ohlcv();
    let result = ichimoku(&high, &low, 9, 26, 52).unwrap();
    assert_eq!(result.senkou_a.len(), high.len());
    assert!(result.senkou_a[50].is_nan());
    assert!(result.senkou_a[51].is_finite());
}

#[test]
fn test_flat_market_degenerate_markers() {
    let flat = vec![10.0; 30];
    let volume = vec![100.0; 30];

    let k = stochastic_k(&flat, &flat, &flat, 14).unwrap();
    assert!(k[12].is_nan());
    assert!(is_degenerate(k[13]));

    let r = rsi(&flat, 14).unwrap();
    assert!(is_degenerate(r[14]));

    let ch = chaikin_oscillator(&flat, &flat, &flat, &volume, 3, 10).unwrap();
    assert!(ch.iter().all(|v| is_degenerate(*v)));

    assert_eq!(Reading::classify(k[29]), Reading::Degenerate);
    assert_eq!(Reading::classify(k[0]), Reading::Missing);
}

#[test]
fn test_frame_is_deterministic() {
    let (open, high, low, close, volume) = sample_ohlcv();
    let data = OhlcvData::new(
        (0..close.len() as i64).collect(),
        open,
        high,
        low,
        close,
        Some(volume),
    )
    .unwrap();
    let params = IndicatorParams::default();

    let first = TechnicalFrame::compute(&data, &params).unwrap();
    let second = TechnicalFrame::compute(&data, &params).unwrap();
    for (a, b) in first.series().iter().zip(second.series()) {
        assert_eq!(a.name, b.name);
        let same = a
            .values
            .iter()
            .zip(&b.values)
            .all(|(x, y)| x.to_bits() == y.to_bits());
        assert!(same, "{} differs between runs", a.name);
    }
}

fn bars_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    prop::collection::vec((1.0f64..500.0, 0.0f64..10.0, 0.0f64..1.0), 0..80).prop_map(|rows| {
        let close: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let high: Vec<f64> = rows.iter().map(|r| r.0 + r.1).collect();
        let low: Vec<f64> = rows.iter().map(|r| r.0 - r.1 * r.2).collect();
        (high, low, close)
    })
}

proptest! {
    #[test]
    fn prop_output_length_matches_input((high, low, close) in bars_strategy()) {
        let n = close.len();
        prop_assert_eq!(rsi(&close, 14).unwrap().len(), n);
        prop_assert_eq!(macd(&close, 12, 26, 9).unwrap().signal_line.len(), n);
        prop_assert_eq!(stochastic_k(&high, &low, &close, 14).unwrap().len(), n);
        prop_assert_eq!(cci(&high, &low, &close, 20).unwrap().len(), n);
        prop_assert_eq!(williams_r(&high, &low, &close, 14).unwrap().len(), n);
        prop_assert_eq!(atr(&high, &low, &close, 14).unwrap().len(), n);
        prop_assert_eq!(ultimate_oscillator(&high, &low, &close, 7, 14, 28).unwrap().len(), n);
        prop_assert_eq!(bollinger_bands(&close, 20, 2.0).unwrap().upper.len(), n);
        prop_assert_eq!(ichimoku(&high, &low, 9, 26, 52).unwrap().senkou_b.len(), n);
    }

    #[test]
    fn prop_warmup_is_missing((high, low, close) in bars_strategy()) {
        let k = stochastic_k(&high, &low, &close, 14).unwrap();
        prop_assert!(k.iter().take(13).all(|v| v.is_nan()));
        let r = rsi(&close, 14).unwrap();
        prop_assert!(r.iter().take(14).all(|v| v.is_nan()));
        let a = atr(&high, &low, &close, 14).unwrap();
        prop_assert!(a.iter().take(14).all(|v| v.is_nan()));
    }

    #[test]
    fn prop_bounded_oscillators((high, low, close) in bars_strategy()) {
        let tol = 1e-9;
        for v in rsi(&close, 14).unwrap().into_iter().filter(|v| v.is_finite()) {
            prop_assert!((-tol..=100.0 + tol).contains(&v));
        }
        let k = stochastic_k(&high, &low, &close, 14).unwrap();
        for v in k.into_iter().filter(|v| v.is_finite()) {
            prop_assert!((-tol..=100.0 + tol).contains(&v));
        }
    }
}
