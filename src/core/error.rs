//! Error types for FinLite.

use thiserror::Error;

/// Result type alias for FinLite operations.
pub type Result<T> = std::result::Result<T, FinliteError>;

/// Structural errors surfaced to the caller.
///
/// Numeric edge cases (short history, zero ranges) never end up here; they are
/// encoded in the output series as missing or degenerate values.
#[derive(Error, Debug)]
pub enum FinliteError {
    /// Data length mismatch between aligned columns.
    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A column required by the computation is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Timestamps must be strictly increasing.
    #[error("Timestamp at index {index} is not strictly after its predecessor")]
    UnorderedTimestamps { index: usize },

    /// Market name not present in the catalog.
    #[error("Unknown market: {name}")]
    UnknownMarket { name: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FinliteError {
    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unknown market error.
    pub fn unknown_market(name: impl Into<String>) -> Self {
        Self::UnknownMarket { name: name.into() }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Check that every column has the expected length.
pub(crate) fn ensure_aligned(expected: usize, columns: &[&[f64]]) -> Result<()> {
    match columns.iter().find(|c| c.len() != expected) {
        Some(column) => Err(FinliteError::length_mismatch(expected, column.len())),
        None => Ok(()),
    }
}
