//! Core types and utilities for FinLite.

pub mod error;
pub mod reading;
pub mod session;
pub mod timeseries;
pub mod types;

pub use error::{FinliteError, Result};
pub use reading::{is_degenerate, Reading, DEGENERATE, MISSING};
pub use session::SessionHours;
pub use timeseries::IndicatorSeries;
pub use types::*;
