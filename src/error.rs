//! Error types for the taxi-decomp crate

use thiserror::Error;

/// Main error type for the taxi-decomp crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state {state} is out of range (must be below {limit})")]
    StateOutOfRange { state: usize, limit: usize },

    #[error("{field} value {value} is out of range (must be below {limit})")]
    FieldOutOfRange {
        field: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("action {action} is out of range (must be below {limit})")]
    ActionOutOfRange { action: usize, limit: usize },

    #[error("action {action} is a pickup/dropoff action and cannot reach the navigation agent")]
    HeuristicAction { action: usize },

    #[error("no actions available to choose from")]
    NoActionsAvailable,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
