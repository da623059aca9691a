//! Full indicator snapshot for one OHLCV series, and gauge readouts.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::momentum::{cci, macd, rsi, stochastic_k, ultimate_oscillator, williams_r};
use super::trend::ichimoku;
use super::volatility::{atr, bollinger_bands};
use super::volume::{chaikin_oscillator, obv};
use crate::core::error::FinliteError;
use crate::core::{IndicatorSeries, OhlcvData, Reading, Result};

/// Window lengths for every indicator in a [`TechnicalFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stochastic_period: usize,
    pub cci_period: usize,
    pub williams_period: usize,
    pub atr_period: usize,
    pub chaikin_fast: usize,
    pub chaikin_slow: usize,
    pub uo_short: usize,
    pub uo_medium: usize,
    pub uo_long: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub tenkan_period: usize,
    pub kijun_period: usize,
    pub senkou_b_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stochastic_period: 14,
            cci_period: 20,
            williams_period: 14,
            atr_period: 14,
            chaikin_fast: 3,
            chaikin_slow: 10,
            uo_short: 7,
            uo_medium: 14,
            uo_long: 28,
            bollinger_period: 20,
            bollinger_k: 2.0,
            tenkan_period: 9,
            kijun_period: 26,
            senkou_b_period: 52,
        }
    }
}

impl IndicatorParams {
    /// Reject zero windows and inconsistent pairs.
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("stochastic_period", self.stochastic_period),
            ("cci_period", self.cci_period),
            ("williams_period", self.williams_period),
            ("atr_period", self.atr_period),
            ("chaikin_fast", self.chaikin_fast),
            ("chaikin_slow", self.chaikin_slow),
            ("uo_short", self.uo_short),
            ("uo_medium", self.uo_medium),
            ("uo_long", self.uo_long),
            ("bollinger_period", self.bollinger_period),
            ("tenkan_period", self.tenkan_period),
            ("kijun_period", self.kijun_period),
            ("senkou_b_period", self.senkou_b_period),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(FinliteError::invalid_config(format!("{name} must be > 0")));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(FinliteError::invalid_config(
                "macd_fast must be smaller than macd_slow",
            ));
        }
        if !self.bollinger_k.is_finite() || self.bollinger_k < 0.0 {
            return Err(FinliteError::invalid_config(
                "bollinger_k must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Every indicator computed over one OHLCV series, aligned with its bars.
///
/// `obv` and `chaikin` are `None` when the series has no volume column.
#[derive(Debug, Clone)]
pub struct TechnicalFrame {
    pub timestamps: Vec<i64>,
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub stoch_k: Vec<f64>,
    pub cci: Vec<f64>,
    pub williams_r: Vec<f64>,
    pub atr: Vec<f64>,
    pub chaikin: Option<Vec<f64>>,
    pub ultimate: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub obv: Option<Vec<f64>>,
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
}

/// Gauge descriptor for one oscillator.
#[derive(Debug, Clone, Serialize)]
pub struct Gauge {
    pub name: &'static str,
    pub reading: Reading,
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

impl TechnicalFrame {
    /// Compute all indicators.
    ///
    /// Fails only on invalid parameters. Short history yields missing values;
    /// a series without volume skips the volume indicators.
    pub fn compute(data: &OhlcvData, params: &IndicatorParams) -> Result<Self> {
        params.validate()?;
        let (high, low, close) = (data.high(), data.low(), data.close());

        let (obv, chaikin) = match data.volume() {
            Some(volume) => (
                Some(obv(close, volume)?),
                Some(chaikin_oscillator(
                    high,
                    low,
                    close,
                    volume,
                    params.chaikin_fast,
                    params.chaikin_slow,
                )?),
            ),
            None => {
                debug!(bars = data.len(), "no volume column; skipping OBV and Chaikin");
                (None, None)
            }
        };

        let macd = macd(close, params.macd_fast, params.macd_slow, params.macd_signal)?;
        let bands = bollinger_bands(close, params.bollinger_period, params.bollinger_k)?;
        let cloud = ichimoku(
            high,
            low,
            params.tenkan_period,
            params.kijun_period,
            params.senkou_b_period,
        )?;

        Ok(Self {
            timestamps: data.timestamps().to_vec(),
            rsi: rsi(close, params.rsi_period)?,
            macd: macd.macd_line,
            macd_signal: macd.signal_line,
            macd_histogram: macd.histogram,
            stoch_k: stochastic_k(high, low, close, params.stochastic_period)?,
            cci: cci(high, low, close, params.cci_period)?,
            williams_r: williams_r(high, low, close, params.williams_period)?,
            atr: atr(high, low, close, params.atr_period)?,
            chaikin,
            ultimate: ultimate_oscillator(
                high,
                low,
                close,
                params.uo_short,
                params.uo_medium,
                params.uo_long,
            )?,
            bb_middle: bands.middle,
            bb_upper: bands.upper,
            bb_lower: bands.lower,
            obv,
            tenkan: cloud.tenkan,
            kijun: cloud.kijun,
            senkou_a: cloud.senkou_a,
            senkou_b: cloud.senkou_b,
        })
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Named columns in display order; absent volume indicators are skipped.
    fn columns(&self) -> Vec<(&'static str, &Vec<f64>)> {
        let columns: [(&'static str, Option<&Vec<f64>>); 18] = [
            ("RSI", Some(&self.rsi)),
            ("MACD", Some(&self.macd)),
            ("MACD_Signal", Some(&self.macd_signal)),
            ("MACD_Hist", Some(&self.macd_histogram)),
            ("STOCH_K", Some(&self.stoch_k)),
            ("CCI", Some(&self.cci)),
            ("WILLR", Some(&self.williams_r)),
            ("ATR", Some(&self.atr)),
            ("CHAIKIN", self.chaikin.as_ref()),
            ("UO", Some(&self.ultimate)),
            ("BB_Middle", Some(&self.bb_middle)),
            ("BB_Upper", Some(&self.bb_upper)),
            ("BB_Lower", Some(&self.bb_lower)),
            ("OBV", self.obv.as_ref()),
            ("Tenkan", Some(&self.tenkan)),
            ("Kijun", Some(&self.kijun)),
            ("SenkouA", Some(&self.senkou_a)),
            ("SenkouB", Some(&self.senkou_b)),
        ];
        columns
            .into_iter()
            .filter_map(|(name, values)| values.map(|v| (name, v)))
            .collect()
    }

    /// All indicators as named series, for charting.
    pub fn series(&self) -> Vec<IndicatorSeries> {
        self.columns()
            .into_iter()
            .map(|(name, values)| IndicatorSeries {
                name: name.to_string(),
                timestamps: self.timestamps.clone(),
                values: values.clone(),
            })
            .collect()
    }

    /// Latest reading of every indicator, keyed by name.
    pub fn latest(&self) -> IndexMap<&'static str, Reading> {
        self.columns()
            .into_iter()
            .map(|(name, values)| {
                let last = values.last().copied().unwrap_or(f64::NAN);
                (name, Reading::classify(last))
            })
            .collect()
    }

    /// Oscillator gauges with their display ranges.
    pub fn oscillator_gauges(&self) -> Vec<Gauge> {
        let last = |v: &[f64]| Reading::classify(v.last().copied().unwrap_or(f64::NAN));
        let atr = last(&self.atr);
        let atr_max = atr.value().map_or(20.0, |v| (v * 1.5).max(20.0));

        vec![
            Gauge {
                name: "RSI",
                reading: last(&self.rsi),
                min: 0.0,
                max: 100.0,
                description: "Relative Strength Index: speed and change of price movements (0-100). Above 70 overbought, below 30 oversold.",
            },
            Gauge {
                name: "STOCH_K",
                reading: last(&self.stoch_k),
                min: 0.0,
                max: 100.0,
                description: "Stochastic Oscillator: close relative to the 14-day range (0-100). Above 80 overbought, below 20 oversold.",
            },
            Gauge {
                name: "CCI",
                reading: last(&self.cci),
                min: -200.0,
                max: 200.0,
                description: "Commodity Channel Index: deviation of price from its average. Extreme values flag potential reversals.",
            },
            Gauge {
                name: "WILLR",
                reading: last(&self.williams_r),
                min: -100.0,
                max: 0.0,
                description: "Williams %R: momentum oscillator (0 to -100). Above -20 overbought, below -80 oversold.",
            },
            Gauge {
                name: "MACD",
                reading: last(&self.macd_histogram),
                min: -10.0,
                max: 10.0,
                description: "MACD minus signal line. Positive is bullish momentum, negative bearish.",
            },
            Gauge {
                name: "ATR",
                reading: atr,
                min: 0.0,
                max: atr_max,
                description: "Average True Range: volatility from the daily price range. Higher is more volatile.",
            },
            Gauge {
                name: "CHAIKIN",
                reading: self.chaikin.as_deref().map_or(Reading::Missing, last),
                min: -1e9,
                max: 1e9,
                description: "Chaikin Oscillator: momentum of the accumulation/distribution line.",
            },
            Gauge {
                name: "UO",
                reading: last(&self.ultimate),
                min: 0.0,
                max: 100.0,
                description: "Ultimate Oscillator: buying pressure over 7, 14 and 28 bars (0-100).",
            },
        ]
    }
}

/// Compute frames for many symbols in parallel.
///
/// Results keep the input order, one per symbol.
pub fn compute_batch(
    batch: &IndexMap<String, OhlcvData>,
    params: &IndicatorParams,
) -> IndexMap<String, Result<TechnicalFrame>> {
    let entries: Vec<(&String, &OhlcvData)> = batch.iter().collect();
    let frames: Vec<(String, Result<TechnicalFrame>)> = entries
        .par_iter()
        .map(|(symbol, data)| ((*symbol).clone(), TechnicalFrame::compute(data, params)))
        .collect();

    debug!(symbols = frames.len(), "computed indicator snapshots");
    frames.into_iter().collect()
}
