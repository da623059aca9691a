//! Core data types for FinLite.

use serde::{Deserialize, Serialize};

use super::error::{ensure_aligned, FinliteError, Result};

/// Type alias for price values.
pub type Price = f64;

/// Type alias for timestamp values (nanoseconds since epoch, UTC).
pub type Timestamp = i64;

/// OHLCV data for a single bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Option<f64>,
}

/// Column-oriented OHLCV series.
///
/// Columns are aligned and timestamps are strictly increasing. Values may be
/// `NaN`. The volume column is optional; indicators that need it report
/// [`FinliteError::MissingField`] when it is absent.
#[derive(Debug, Clone, Default)]
pub struct OhlcvData {
    timestamps: Vec<Timestamp>,
    open: Vec<Price>,
    high: Vec<Price>,
    low: Vec<Price>,
    close: Vec<Price>,
    volume: Option<Vec<f64>>,
}

impl OhlcvData {
    /// Create OHLCV data from columns, validating alignment and ordering.
    pub fn new(
        timestamps: Vec<Timestamp>,
        open: Vec<Price>,
        high: Vec<Price>,
        low: Vec<Price>,
        close: Vec<Price>,
        volume: Option<Vec<f64>>,
    ) -> Result<Self> {
        let n = timestamps.len();
        ensure_aligned(n, &[&open, &high, &low, &close])?;
        if let Some(volume) = &volume {
            ensure_aligned(n, &[volume])?;
        }
        if let Some(index) = (1..n).find(|&i| timestamps[i] <= timestamps[i - 1]) {
            return Err(FinliteError::UnorderedTimestamps { index });
        }

        Ok(Self {
            timestamps,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Build from row-oriented bars.
    ///
    /// Volume is kept only if every bar carries one.
    pub fn from_bars(bars: &[OhlcvBar]) -> Result<Self> {
        let volume = bars.iter().map(|b| b.volume).collect::<Option<Vec<_>>>();
        Self::new(
            bars.iter().map(|b| b.timestamp).collect(),
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            volume,
        )
    }

    /// Close-only series (open/high/low set equal to close, no volume).
    ///
    /// Useful for index-level data such as a volatility index.
    pub fn from_closes(timestamps: Vec<Timestamp>, close: Vec<Price>) -> Result<Self> {
        Self::new(
            timestamps,
            close.clone(),
            close.clone(),
            close.clone(),
            close,
            None,
        )
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    #[inline]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    #[inline]
    pub fn open(&self) -> &[Price] {
        &self.open
    }

    #[inline]
    pub fn high(&self) -> &[Price] {
        &self.high
    }

    #[inline]
    pub fn low(&self) -> &[Price] {
        &self.low
    }

    #[inline]
    pub fn close(&self) -> &[Price] {
        &self.close
    }

    /// Volume column, if the source provided one.
    #[inline]
    pub fn volume(&self) -> Option<&[f64]> {
        self.volume.as_deref()
    }

    /// Volume column, or a structural error when absent.
    pub fn require_volume(&self) -> Result<&[f64]> {
        self.volume().ok_or_else(|| FinliteError::missing_field("volume"))
    }

    /// Get a single bar at index.
    pub fn get_bar(&self, index: usize) -> Option<OhlcvBar> {
        if index >= self.len() {
            return None;
        }
        Some(OhlcvBar {
            timestamp: self.timestamps[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume.as_ref().map(|v| v[index]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, close: f64, volume: Option<f64>) -> OhlcvBar {
        OhlcvBar {
            timestamp,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn test_from_bars() {
        let bars = vec![bar(1, 10.0, Some(100.0)), bar(2, 11.0, Some(200.0))];
        let data = OhlcvData::from_bars(&bars).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.high(), &[11.0, 12.0]);
        assert_eq!(data.volume(), Some(&[100.0, 200.0][..]));
        assert_eq!(data.get_bar(1).unwrap().volume, Some(200.0));
        assert!(data.get_bar(2).is_none());
    }

    #[test]
    fn test_partial_volume_is_dropped() {
        let bars = vec![bar(1, 10.0, Some(100.0)), bar(2, 11.0, None)];
        let data = OhlcvData::from_bars(&bars).unwrap();
        assert!(data.volume().is_none());
        assert!(matches!(
            data.require_volume(),
            Err(FinliteError::MissingField { .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_timestamps() {
        let bars = vec![bar(1, 10.0, None), bar(3, 11.0, None), bar(3, 12.0, None)];
        let err = OhlcvData::from_bars(&bars).unwrap_err();
        assert!(matches!(err, FinliteError::UnorderedTimestamps { index: 2 }));
    }

    #[test]
    fn test_rejects_misaligned_columns() {
        let result = OhlcvData::new(
            vec![1, 2],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0],
            vec![1.0, 2.0],
            None,
        );
        assert!(matches!(
            result,
            Err(FinliteError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_empty() {
        let data = OhlcvData::default();
        assert!(data.is_empty());
        assert_eq!(data.len(), 0);
    }
}
