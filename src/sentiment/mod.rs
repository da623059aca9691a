//! Market sentiment (fear/greed) scoring.
//!
//! Three components (momentum, price strength, volatility) are computed from a
//! benchmark index and a volatility index, averaged into a composite 0-100
//! score and classified into a [`SentimentBucket`].

pub mod components;
pub mod composite;

pub use components::{
    momentum_score, strength_score, volatility_score, Component, ComponentScore, NEUTRAL_SCORE,
};
pub use composite::{
    composite_score, CompositeSentiment, SentimentAdvisory, SentimentBucket, SentimentConfig,
    SentimentScorer,
};
