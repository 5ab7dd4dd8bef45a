//! Error types for the holdings aggregator

use thiserror::Error;

/// Error codes reported alongside a failed title lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    FetchFailure = 2,
    BadMetadata = 3,
    BadConfig = 4,
}

/// Main error type
#[derive(Error, Debug)]
pub enum HoldingsError {
    #[error("Record fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid holding metadata: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HoldingsError {
    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            HoldingsError::Fetch(_) | HoldingsError::Io(_) => ErrorCode::FetchFailure,
            HoldingsError::Metadata(_) => ErrorCode::BadMetadata,
            HoldingsError::Config(_) => ErrorCode::BadConfig,
            HoldingsError::Serialization(_) => ErrorCode::Failure,
        }
    }

    /// Message shown to catalog users instead of the holdings of a failed title
    pub fn user_message(&self) -> &'static str {
        "Holdings unavailable"
    }
}

/// Result type alias for holdings operations
pub type HoldingsResult<T> = Result<T, HoldingsError>;
