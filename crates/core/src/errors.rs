//! Error types for the prompts loader
//!
//! Every failure of a load is fatal: errors are propagated to the binary,
//! which reports them once and exits with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Main error type for the loader
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A schema or JSON file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SQLite error (open, schema batch, delete, insert, commit)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The JSON source is not valid JSON
    #[error("Invalid JSON in {}: {source}", .path.display())]
    JsonParse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A structured field could not be re-encoded as JSON text
    #[error("Failed to encode JSON text: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The schema did not produce a usable prompts table
    #[error("Schema error: {0}")]
    Schema(String),

    /// The JSON source parsed but its top-level value is not an array
    #[error("Expected a JSON array of prompt records in {}", .path.display())]
    NotAnArray { path: PathBuf },

    /// An array element is not a JSON object
    #[error("Record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// A record lacks one of the required keys
    #[error("Record #{index} is missing required key '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A record value cannot be bound to a SQLite column
    #[error("Record #{index} has an unsupported value for '{field}': {reason}")]
    UnsupportedValue {
        index:  usize,
        field:  &'static str,
        reason: String,
    },

    /// Invalid loader configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Get user-friendly error message for the command line
    pub fn user_message(&self) -> String {
        match self {
            LoaderError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                format!("File not found: {}", path.display())
            },
            LoaderError::MissingField { index, field } => {
                format!(
                    "Record #{} is missing required key '{}'; no rows were loaded",
                    index, field
                )
            },
            LoaderError::Database(err) => {
                format!("Database error: {}", err)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            LoaderError::Io { .. } => "io",
            LoaderError::Database(_) => "database",
            LoaderError::JsonParse { .. } => "parse",
            LoaderError::Encoding(_) => "encoding",
            LoaderError::Schema(_) => "schema",
            LoaderError::NotAnArray { .. } | LoaderError::InvalidRecord { .. } => "record",
            LoaderError::MissingField { .. } => "missing_field",
            LoaderError::UnsupportedValue { .. } => "value",
            LoaderError::Config(_) => "config",
        }
    }
}
