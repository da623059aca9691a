//! Named, timestamp-aligned indicator output.

use serde::Serialize;

use super::error::{ensure_aligned, Result};
use super::reading::Reading;
use super::types::Timestamp;

/// A derived series aligned 1:1 with the bars it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSeries {
    /// Display name (e.g. `"RSI"`, `"MACD_Signal"`).
    pub name: String,
    /// Timestamps of the source bars.
    pub timestamps: Vec<Timestamp>,
    /// Values; `NaN` is missing, infinity is degenerate.
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    /// Create a new named series.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<Timestamp>,
        values: Vec<f64>,
    ) -> Result<Self> {
        ensure_aligned(timestamps.len(), &[&values])?;
        Ok(Self {
            name: name.into(),
            timestamps,
            values,
        })
    }

    /// Get the length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at the last bar (`NaN` when empty).
    pub fn latest(&self) -> f64 {
        self.values.last().copied().unwrap_or(f64::NAN)
    }

    /// Classified value at the last bar, for gauges.
    pub fn latest_reading(&self) -> Reading {
        Reading::classify(self.latest())
    }

    /// Iterator over (timestamp, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest() {
        let series =
            IndicatorSeries::new("RSI", vec![1, 2, 3], vec![f64::NAN, 40.0, 55.0]).unwrap();
        assert_eq!(series.latest(), 55.0);
        assert_eq!(series.latest_reading(), Reading::Value(55.0));
        assert_eq!(series.iter().nth(1), Some((2, 40.0)));
    }

    #[test]
    fn test_empty_latest_is_missing() {
        let series = IndicatorSeries::new("ATR", vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.latest_reading(), Reading::Missing);
    }

    #[test]
    fn test_misaligned() {
        assert!(IndicatorSeries::new("OBV", vec![1, 2], vec![1.0]).is_err());
    }
}
