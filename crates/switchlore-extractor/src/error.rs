//! Error types for the Extractor

use crate::types::ExtractionFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole query
///
/// Per-file problems (no template for a section, a block action choking on
/// one file) are not errors at this level; they are collected in
/// [`QueryResult::failures`](crate::QueryResult::failures).
#[derive(Error, Debug)]
pub enum QueryError {
    /// Malformed or unresolvable command specification
    #[error("Invalid command specification: {0}")]
    InvalidSpec(String),

    /// A pre-normalized spec named an action this engine does not have
    #[error("Action '{0}' is not registered")]
    UnregisteredAction(String),

    /// Source discovery error
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// File could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Strict mode turned a per-file failure into a query failure
    #[error("Extraction failed in strict mode: {0}")]
    Strict(ExtractionFailure),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::InvalidSpec(e.to_string())
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(e: toml::de::Error) -> Self {
        QueryError::InvalidSpec(e.to_string())
    }
}
