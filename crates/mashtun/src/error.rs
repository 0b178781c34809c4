//! Error types for the mashtun library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mashtun operations.
#[derive(Debug, Error)]
pub enum MashtunError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The dataset is missing a column or table the operation needs.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Failure saving or loading an ingredient map.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown ingredient category name.
    #[error("Unknown category '{0}'. Use: ferm, hop, yeast, or misc.")]
    UnknownCategory(String),
}

/// Result type alias for mashtun operations.
pub type Result<T> = std::result::Result<T, MashtunError>;
