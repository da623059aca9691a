//! FinLite - indicator and market sentiment engine for the FinLite dashboard.
//!
//! This crate provides the numeric core behind the dashboard widgets:
//! - Series utilities and technical indicators (RSI, MACD, Stochastic, CCI,
//!   Williams %R, ATR, Chaikin, Ultimate Oscillator, Bollinger Bands, OBV, Ichimoku)
//! - A fear/greed sentiment score built from momentum, price strength and volatility
//! - Day-over-day performance records and gainers/losers ranking
//! - TOML settings with the market catalog and trading session hours
//!
//! Everything is a pure function of already-fetched series. Fetching, caching
//! and rendering belong to the caller.

pub mod config;
pub mod core;
pub mod indicators;
pub mod performance;
pub mod sentiment;

pub use crate::config::{load_settings_path, load_settings_str, Instrument, Market, Settings};
pub use crate::core::{FinliteError, OhlcvBar, OhlcvData, Reading, Result};
pub use crate::indicators::{IndicatorParams, TechnicalFrame};
pub use crate::performance::{rank, rank_market, PerformanceRecord, Ranking};
pub use crate::sentiment::{CompositeSentiment, SentimentBucket, SentimentConfig, SentimentScorer};
