//! Composite fear/greed score and sentiment buckets.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::components::{
    momentum_score, strength_score, volatility_score, Component, ComponentScore, NEUTRAL_SCORE,
};
use crate::core::error::FinliteError;
use crate::core::{OhlcvData, Result};

/// Sentiment bucket over the 0-100 composite scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentBucket {
    /// Buckets in evaluation order, lowest range first.
    pub const ALL: [SentimentBucket; 5] = [
        SentimentBucket::ExtremeFear,
        SentimentBucket::Fear,
        SentimentBucket::Neutral,
        SentimentBucket::Greed,
        SentimentBucket::ExtremeGreed,
    ];

    /// Closed range covered by the bucket. Adjacent ranges share endpoints.
    pub fn range(self) -> (f64, f64) {
        match self {
            SentimentBucket::ExtremeFear => (0.0, 25.0),
            SentimentBucket::Fear => (25.0, 45.0),
            SentimentBucket::Neutral => (45.0, 55.0),
            SentimentBucket::Greed => (55.0, 75.0),
            SentimentBucket::ExtremeGreed => (75.0, 100.0),
        }
    }

    /// First bucket, scanning low to high, whose closed range holds `score`.
    ///
    /// A shared endpoint therefore belongs to the lower bucket. Scores outside
    /// `[0, 100]` (or `NaN`) fall back to `Neutral`.
    pub fn classify(score: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|bucket| {
                let (lo, hi) = bucket.range();
                lo <= score && score <= hi
            })
            .unwrap_or(SentimentBucket::Neutral)
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentBucket::ExtremeFear => "Extreme Fear",
            SentimentBucket::Fear => "Fear",
            SentimentBucket::Neutral => "Neutral",
            SentimentBucket::Greed => "Greed",
            SentimentBucket::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-fatal advisory attached to a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentAdvisory {
    /// The benchmark or volatility-index series was empty.
    MissingMarketData,
}

impl fmt::Display for SentimentAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentAdvisory::MissingMarketData => f.write_str("Missing market data"),
        }
    }
}

/// Window lengths for the sentiment components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentimentConfig {
    /// Moving-average window for momentum.
    pub momentum_window: usize,
    /// High/low range window for strength (one trading year).
    pub strength_window: usize,
    /// Moving-average window for the volatility index.
    pub volatility_window: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            momentum_window: 125,
            strength_window: 252,
            volatility_window: 50,
        }
    }
}

impl SentimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.momentum_window == 0 || self.strength_window == 0 || self.volatility_window == 0 {
            return Err(FinliteError::invalid_config(
                "sentiment windows must be > 0",
            ));
        }
        Ok(())
    }
}

/// Composite sentiment record handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeSentiment {
    pub momentum: ComponentScore,
    pub strength: ComponentScore,
    pub volatility: ComponentScore,
    /// Mean of the valid components, or 50 when none is valid.
    pub composite: f64,
    pub bucket: SentimentBucket,
    pub computed_at: DateTime<Utc>,
    pub advisory: Option<SentimentAdvisory>,
}

impl CompositeSentiment {
    /// Components with their identity, in display order.
    pub fn components(&self) -> [(Component, ComponentScore); 3] {
        [
            (Component::Momentum, self.momentum),
            (Component::Strength, self.strength),
            (Component::Volatility, self.volatility),
        ]
    }

    /// Whether every component fell back to neutral.
    pub fn is_all_default(&self) -> bool {
        self.components().iter().all(|(_, s)| s.is_default)
    }
}

/// Arithmetic mean of the valid scores; [`NEUTRAL_SCORE`] if there are none.
pub fn composite_score(scores: &[ComponentScore]) -> f64 {
    let valid: Vec<f64> = scores.iter().filter(|s| s.is_valid()).map(|s| s.value).collect();
    if valid.is_empty() {
        NEUTRAL_SCORE
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    }
}

/// Scores market sentiment from a benchmark index and a volatility index.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    config: SentimentConfig,
}

impl SentimentScorer {
    pub fn new(config: SentimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Score now.
    pub fn score(&self, benchmark: &OhlcvData, volatility_index: &OhlcvData) -> CompositeSentiment {
        self.score_at(benchmark, volatility_index, Utc::now())
    }

    /// Score with an explicit computation timestamp.
    pub fn score_at(
        &self,
        benchmark: &OhlcvData,
        volatility_index: &OhlcvData,
        computed_at: DateTime<Utc>,
    ) -> CompositeSentiment {
        let momentum = momentum_score(benchmark.close(), self.config.momentum_window);
        let strength = strength_score(benchmark, self.config.strength_window);
        let volatility = volatility_score(volatility_index.close(), self.config.volatility_window);

        let composite = composite_score(&[momentum, strength, volatility]);

        let advisory = if benchmark.is_empty() || volatility_index.is_empty() {
            warn!(
                benchmark_bars = benchmark.len(),
                volatility_bars = volatility_index.len(),
                "sentiment computed without market data"
            );
            Some(SentimentAdvisory::MissingMarketData)
        } else {
            None
        };

        CompositeSentiment {
            momentum,
            strength,
            volatility,
            composite,
            bucket: SentimentBucket::classify(composite),
            computed_at,
            advisory,
        }
    }
}
