//! Error types for fxcalc

use thiserror::Error;

/// Main error type for fxcalc
#[derive(Error, Debug)]
pub enum FxcalcError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate fetch failed: {0}")]
    FetchError(String),

    #[error("Malformed rate payload: {0}")]
    PayloadError(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for fxcalc operations
pub type Result<T> = std::result::Result<T, FxcalcError>;
