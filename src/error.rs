//! Error types for liftlog
//!
//! Analytics stages never fail on malformed set data; these errors only surface
//! at the edges (document parsing, configuration, export encoding).

use thiserror::Error;

/// Errors that can occur while reading input, loading config, or encoding output
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse set log: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
