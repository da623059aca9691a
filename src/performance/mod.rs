//! Symbol performance and gainers/losers ranking.

pub mod ranking;

pub use ranking::{
    change_from_first, compute_records, performance_record, rank, rank_market, CloseBatch,
    PerformanceRecord, Ranking, SymbolSeries,
};
