//! Settings: market catalog, indicator parameters and sentiment windows.
//!
//! Settings are TOML, loaded once at startup and passed explicitly to the
//! components that need them:
//! - `[indicators]` maps onto [`IndicatorParams`] (all fields optional)
//! - `[sentiment]` maps onto [`SentimentConfig`] (all fields optional)
//! - `[markets.<name>]` lists the instruments of a market, in display order,
//!   with optional UTC session hours per market or per instrument
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_settings_str`]
//! - Parse + validate from a file path: [`load_settings_path`]
//! - Embedded defaults: [`Settings::builtin`]

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::FinliteError;
use crate::core::{Result, SessionHours};
use crate::indicators::IndicatorParams;
use crate::sentiment::SentimentConfig;

const BUILTIN_SETTINGS: &str = include_str!("markets.toml");

/// Top-level settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    /// Market name -> market. Order is preserved.
    #[serde(default)]
    pub markets: IndexMap<String, Market>,
}

/// One market (region or asset class) and its instruments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Market {
    /// Session hours shared by the instruments; `None` trades around the clock.
    #[serde(default)]
    pub session: Option<SessionHours>,
    pub instruments: Vec<Instrument>,
}

/// A tradable instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Instrument {
    pub symbol: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    /// Overrides the market session.
    #[serde(default)]
    pub session: Option<SessionHours>,
}

impl Market {
    /// Symbols in catalog order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|i| i.symbol.as_str())
    }

    /// Session hours that apply to an instrument of this market.
    pub fn session_for(&self, instrument: &Instrument) -> Option<SessionHours> {
        instrument.session.or(self.session)
    }
}

impl Settings {
    /// Embedded default settings.
    pub fn builtin() -> Result<Self> {
        load_settings_str(BUILTIN_SETTINGS)
    }

    /// Look up a market by name.
    pub fn market(&self, name: &str) -> Result<&Market> {
        self.markets
            .get(name)
            .ok_or_else(|| FinliteError::unknown_market(name))
    }

    /// Find an instrument and the market it belongs to.
    pub fn find_instrument(&self, symbol: &str) -> Option<(&Market, &Instrument)> {
        self.markets.values().find_map(|market| {
            market
                .instruments
                .iter()
                .find(|i| i.symbol == symbol)
                .map(|i| (market, i))
        })
    }

    /// Whether the instrument's market is in session at `now`.
    ///
    /// Unknown symbols and instruments without session hours count as open.
    pub fn is_market_open(&self, symbol: &str, now: DateTime<Utc>) -> bool {
        self.find_instrument(symbol)
            .and_then(|(market, instrument)| market.session_for(instrument))
            .map_or(true, |session| session.is_open(now))
    }

    /// Trim symbols and reject empty or duplicate entries, zero windows and
    /// invalid parameters.
    pub fn normalize(mut self) -> Result<Self> {
        self.indicators.validate()?;
        self.sentiment.validate()?;

        for (name, market) in self.markets.iter_mut() {
            let mut seen = HashSet::new();
            for instrument in market.instruments.iter_mut() {
                let symbol = instrument.symbol.trim().to_string();
                if symbol.is_empty() {
                    return Err(FinliteError::invalid_config(format!(
                        "market {name}: empty symbol"
                    )));
                }
                if !seen.insert(symbol.clone()) {
                    return Err(FinliteError::invalid_config(format!(
                        "market {name}: duplicate symbol {symbol}"
                    )));
                }
                instrument.symbol = symbol;
            }
        }
        Ok(self)
    }
}

/// Parse and validate settings from a TOML string.
pub fn load_settings_str(s: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(s)?;
    let settings = settings.normalize()?;
    info!(markets = settings.markets.len(), "loaded settings");
    Ok(settings)
}

/// Parse and validate settings from a file.
pub fn load_settings_path(path: impl AsRef<Path>) -> Result<Settings> {
    let text = std::fs::read_to_string(path)?;
    load_settings_str(&text)
}
