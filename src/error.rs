//! Error types for labelkit.

use thiserror::Error;

/// Result type for labelkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for labelkit operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required input path does not exist or could not be opened.
    #[error("File not found: {path}")]
    NotFound {
        /// Path as given on the command line.
        path: String,
    },

    /// A field expected to hold structured data failed to parse.
    #[error("Malformed '{field}' field: {detail}")]
    MalformedField {
        /// Name of the offending column.
        field: String,
        /// Parser diagnostic.
        detail: String,
    },

    /// A required CSV header column is absent.
    #[error("Missing required column '{column}' in {path}")]
    SchemaMismatch {
        /// Column the reader expected to find.
        column: String,
        /// File whose header was inspected.
        path: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Platform API request failed.
    #[error("API error: {0}")]
    Api(String),

    /// Client configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a file-not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Create a malformed-field error.
    pub fn malformed_field(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::MalformedField {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Create a schema-mismatch error.
    pub fn schema_mismatch(column: impl Into<String>, path: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create a platform API error.
    pub fn api(msg: impl Into<String>) -> Self {
        Error::Api(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
