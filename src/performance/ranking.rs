//! Day-over-day performance records and gainers/losers ranking.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::core::reading::signed_ratio;
use crate::core::Result;

/// Close (and optional volume) history of one symbol on a shared date index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolSeries {
    pub close: Vec<f64>,
    #[serde(default)]
    pub volume: Option<Vec<f64>>,
}

impl SymbolSeries {
    pub fn new(close: Vec<f64>) -> Self {
        Self {
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: Vec<f64>) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Per-symbol close histories, in input order.
pub type CloseBatch = IndexMap<String, SymbolSeries>;

/// Latest-session performance of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub symbol: String,
    /// Display name (the symbol unless a catalog supplies one).
    pub name: String,
    /// Latest close.
    pub price: f64,
    /// Previous session close.
    pub prior_price: f64,
    /// `(price - prior) / prior * 100`.
    ///
    /// Against a zero prior close this is a degenerate marker signed like the
    /// move (`+inf` up, `-inf` down), or missing when the price stayed at zero.
    pub percent_change: f64,
    pub absolute_change: f64,
    /// Latest volume, when known.
    pub volume: Option<f64>,
}

/// Top gainers and losers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ranking {
    /// Best performers, best first.
    pub gainers: Vec<PerformanceRecord>,
    /// Worst performers, worst first.
    pub losers: Vec<PerformanceRecord>,
}

/// Performance over the last two sessions of a series.
///
/// Returns `None` when fewer than two closes are present, or when either of
/// the last two sessions is missing.
pub fn performance_record(symbol: &str, series: &SymbolSeries) -> Option<PerformanceRecord> {
    let close = &series.close;
    let valid = close.iter().filter(|v| !v.is_nan()).count();
    if valid < 2 {
        return None;
    }

    let today = close[close.len() - 1];
    let yesterday = close[close.len() - 2];
    if today.is_nan() || yesterday.is_nan() {
        return None;
    }

    let absolute_change = today - yesterday;
    let change = signed_ratio(absolute_change, yesterday);
    let percent_change = if change.is_finite() {
        change * 100.0
    } else {
        change
    };
    let volume = series
        .volume
        .as_ref()
        .and_then(|v| v.last().copied())
        .filter(|v| !v.is_nan());

    Some(PerformanceRecord {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        price: today,
        prior_price: yesterday,
        percent_change,
        absolute_change,
        volume,
    })
}

/// Records for every rankable symbol, in batch order.
pub fn compute_records(batch: &CloseBatch) -> Vec<PerformanceRecord> {
    let entries: Vec<(&String, &SymbolSeries)> = batch.iter().collect();
    let records: Vec<Option<PerformanceRecord>> = entries
        .par_iter()
        .map(|(symbol, series)| performance_record(symbol, series))
        .collect();

    entries
        .iter()
        .zip(records)
        .filter_map(|((symbol, _), record)| {
            if record.is_none() {
                debug!(symbol = %symbol, "excluded from ranking: not enough closes");
            }
            record
        })
        .collect()
}

/// Rank records by percent change.
///
/// Records without a percent change are dropped. The rest are sorted
/// descending with a stable sort, so ties keep input order and signed
/// degenerate changes land at the matching end. Gainers are the first
/// `top_n`; losers are the last `top_n`, reversed so the worst performer
/// comes first.
pub fn rank(records: Vec<PerformanceRecord>, top_n: usize) -> Ranking {
    let mut records: Vec<PerformanceRecord> = records
        .into_iter()
        .filter(|r| {
            if r.percent_change.is_nan() {
                debug!(symbol = %r.symbol, "excluded from ranking: undefined change");
                false
            } else {
                true
            }
        })
        .collect();
    records.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));

    let gainers = records.iter().take(top_n).cloned().collect();
    let losers = records.iter().rev().take(top_n).cloned().collect();

    Ranking { gainers, losers }
}

/// Rank the configured instruments of one market.
///
/// Instruments are taken in catalog order and given their display names;
/// symbols absent from the batch are skipped.
pub fn rank_market(
    settings: &Settings,
    market: &str,
    batch: &CloseBatch,
    top_n: usize,
) -> Result<Ranking> {
    let market = settings.market(market)?;

    let ordered: CloseBatch = market
        .instruments
        .iter()
        .filter_map(|i| batch.get(&i.symbol).map(|s| (i.symbol.clone(), s.clone())))
        .collect();

    let mut records = compute_records(&ordered);
    for record in records.iter_mut() {
        if let Some(instrument) = market.instruments.iter().find(|i| i.symbol == record.symbol) {
            record.name = instrument.name.clone();
        }
    }

    Ok(rank(records, top_n))
}

/// Percent change of every close against the first close.
///
/// Returns `None` when the first close is missing or zero.
pub fn change_from_first(close: &[f64]) -> Option<Vec<f64>> {
    let first = *close.first()?;
    if first.is_nan() || first == 0.0 {
        return None;
    }
    Some(close.iter().map(|&c| (c - first) / first * 100.0).collect())
}
