//! Sentiment components: momentum, price strength, volatility.
//!
//! Each component maps recent market behaviour to a 0-100 score. When the
//! history is too short or a reference level is unusable the component falls
//! back to a neutral 50 and records that it did so.

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::core::OhlcvData;

/// Neutral score used when a component cannot be computed.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Which market dimension a component measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Momentum,
    Strength,
    Volatility,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Momentum => "Momentum",
            Component::Strength => "Price Strength",
            Component::Volatility => "Volatility",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Component::Momentum => "Benchmark vs its 125-day moving average",
            Component::Strength => "Position within the 52-week range",
            Component::Volatility => "Volatility index vs its 50-day average",
        }
    }
}

/// A component score tagged with whether it is the neutral fallback.
///
/// `value` is in `[0, 100]`, or `NaN` when the latest input is missing.
/// Serializes as the bare number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScore {
    pub value: f64,
    pub is_default: bool,
}

impl ComponentScore {
    /// A measured score.
    pub fn measured(value: f64) -> Self {
        Self {
            value,
            is_default: false,
        }
    }

    /// The neutral fallback.
    pub fn neutral() -> Self {
        Self {
            value: NEUTRAL_SCORE,
            is_default: true,
        }
    }

    /// Whether the score can take part in the composite.
    pub fn is_valid(&self) -> bool {
        !self.value.is_nan()
    }
}

impl Serialize for ComponentScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(self.value)
        }
    }
}

/// Clamp a raw score onto the 0-100 scale; `NaN` stays `NaN`.
fn to_scale(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

/// Mean of the trailing `window` values, or `None` if any is missing.
fn trailing_mean(data: &[f64], window: usize) -> Option<f64> {
    if window == 0 || data.len() < window {
        return None;
    }
    let tail = &data[data.len() - window..];
    if tail.iter().any(|v| v.is_nan()) {
        return None;
    }
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Percent deviation of the latest value from its trailing mean.
fn deviation_pct(data: &[f64], window: usize) -> Option<f64> {
    let mean = trailing_mean(data, window)?;
    if mean == 0.0 {
        return None;
    }
    let current = *data.last()?;
    Some((current - mean) / mean * 100.0)
}

/// Momentum: latest close against its `window`-bar moving average.
///
/// `clip((deviation_pct + 10) * 5, 0, 100)`.
pub fn momentum_score(close: &[f64], window: usize) -> ComponentScore {
    match deviation_pct(close, window) {
        Some(deviation) => ComponentScore::measured(to_scale((deviation + 10.0) * 5.0)),
        None => {
            debug!(bars = close.len(), window, "momentum falls back to neutral");
            ComponentScore::neutral()
        }
    }
}

/// Price strength: latest close within the trailing `window`-bar high/low range.
///
/// Uses the highest high and lowest low. A degenerate range, a missing extreme
/// or short history is neutral; a missing latest close is missing.
pub fn strength_score(bars: &OhlcvData, window: usize) -> ComponentScore {
    let n = bars.len();
    if window == 0 || n < window {
        debug!(bars = n, window, "strength falls back to neutral");
        return ComponentScore::neutral();
    }

    let highs = &bars.high()[n - window..];
    let lows = &bars.low()[n - window..];
    if highs.iter().chain(lows).any(|v| v.is_nan()) {
        debug!("strength window has missing extremes; neutral");
        return ComponentScore::neutral();
    }

    let high = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let low = lows.iter().copied().fold(f64::INFINITY, f64::min);
    if high == low {
        debug!(high, "strength range is degenerate; neutral");
        return ComponentScore::neutral();
    }

    let current = bars.close()[n - 1];
    ComponentScore::measured(to_scale((current - low) / (high - low) * 100.0))
}

/// Volatility: latest volatility-index level against its `window`-bar average.
///
/// `clip(100 - (deviation_pct + 20) * 2.5, 0, 100)`, so rising volatility
/// lowers the score.
pub fn volatility_score(vix_close: &[f64], window: usize) -> ComponentScore {
    match deviation_pct(vix_close, window) {
        Some(deviation) => {
            ComponentScore::measured(to_scale(100.0 - (deviation + 20.0) * 2.5))
        }
        None => {
            debug!(bars = vix_close.len(), window, "volatility falls back to neutral");
            ComponentScore::neutral()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_last(len: usize, base: f64, last: f64) -> Vec<f64> {
        let mut data = vec![base; len];
        data[len - 1] = last;
        data
    }

    #[test]
    fn test_momentum_short_history_is_neutral() {
        let score = momentum_score(&vec![100.0; 124], 125);
        assert_eq!(score, ComponentScore::neutral());
        assert!(score.is_default);
    }

    #[test]
    fn test_momentum_flat_is_midpoint() {
        // deviation 0 -> (0 + 10) * 5 = 50, measured rather than defaulted
        let score = momentum_score(&vec![100.0; 130], 125);
        assert_eq!(score.value, 50.0);
        assert!(!score.is_default);
    }

    #[test]
    fn test_momentum_zero_average_is_neutral() {
        assert!(momentum_score(&vec![0.0; 125], 125).is_default);
    }

    #[test]
    fn test_momentum_clips_low() {
        let score = momentum_score(&with_last(125, 100.0, 50.0), 125);
        assert_eq!(score.value, 0.0);
    }

    #[test]
    fn test_volatility_calm_market_is_greedy() {
        // Level well below average -> large negative deviation -> clipped to 100
        let score = volatility_score(&with_last(50, 20.0, 5.0), 50);
        assert_eq!(score.value, 100.0);
    }

    #[test]
    fn test_volatility_short_history() {
        assert!(volatility_score(&[20.0; 49], 50).is_default);
    }

    #[test]
    fn test_serialize_nan_as_null() {
        let score = ComponentScore::measured(f64::NAN);
        assert!(!score.is_valid());
        assert_eq!(serde_json::to_string(&score).unwrap(), "null");
        assert_eq!(serde_json::to_string(&ComponentScore::neutral()).unwrap(), "50.0");
    }
}
