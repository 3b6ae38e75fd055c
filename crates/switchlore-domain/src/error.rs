//! Errors raised across the extraction boundaries

use thiserror::Error;

/// Errors reported by a template parser
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// No template exists for this platform/command pair
    #[error("No template for '{command}' on platform '{platform}'")]
    Unsupported {
        /// Platform that was asked for
        platform: String,
        /// Command (section) that was asked for
        command: String,
    },

    /// A template exists but could not be applied to the text
    #[error("Template parse error: {0}")]
    Parse(String),

    /// Template definitions could not be loaded
    #[error("Template load error: {0}")]
    Load(String),
}

/// Errors reported by a custom extraction action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    /// A recognized option has the wrong shape or value
    #[error("Invalid option '{key}': {reason}")]
    InvalidOption {
        /// Option key
        key: String,
        /// What was wrong with it
        reason: String,
    },

    /// The input text could not be segmented
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// Any other action failure
    #[error("Action error: {0}")]
    Other(String),
}

/// A strategy tried to emit a field the executor owns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Field '{0}' is reserved and cannot be emitted by an extraction strategy")]
pub struct ReservedFieldError(pub String);
