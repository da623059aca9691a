//! Technical indicators for FinLite.
//!
//! All indicators are implemented as pure functions that take slice inputs
//! and return Vec outputs of the same length. NaN values are used for the
//! warmup period and for missing input; zero-denominator divisions yield the
//! [`DEGENERATE`](crate::core::DEGENERATE) marker.

pub mod momentum;
pub mod rolling;
pub mod snapshot;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::{cci, macd, rsi, stochastic_k, ultimate_oscillator, williams_r, MacdResult};
pub use snapshot::{compute_batch, Gauge, IndicatorParams, TechnicalFrame};
pub use trend::{ema, ichimoku, sma, IchimokuResult};
pub use volatility::{atr, bollinger_bands, true_range, BollingerBandsResult};
pub use volume::{ad_line, chaikin_oscillator, obv};
