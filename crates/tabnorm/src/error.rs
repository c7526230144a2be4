//! Error types for the tabnorm library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabnorm operations.
#[derive(Debug, Error)]
pub enum TabnormError {
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

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An attribute name that does not exist in the table.
    #[error("Unknown attribute '{attribute}' in {context}")]
    UnknownAttribute { attribute: String, context: String },

    /// Column identifiers must be unique before the engine runs.
    #[error("Duplicate attribute '{0}'; clean the column names first")]
    DuplicateAttribute(String),

    /// A search bound that would make the search meaningless.
    #[error("Invalid bound for {name}: {value}")]
    InvalidBound { name: &'static str, value: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure writing or reading output artifacts.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for tabnorm operations.
pub type Result<T> = std::result::Result<T, TabnormError>;
