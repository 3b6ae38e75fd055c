//! Error types for the CLI application.

use switchlore_domain::TemplateError;
use switchlore_extractor::QueryError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query error
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Template loading error
    #[error("{0}")]
    Template(#[from] TemplateError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The query did not finish in time
    #[error("Query timed out after {0} second(s)")]
    Timeout(u64),

    /// Background task failed
    #[error("Query task failed: {0}")]
    Task(String),
}
