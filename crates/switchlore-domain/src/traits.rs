//! Trait definitions for the two extraction strategies
//!
//! These traits define the boundaries between the query engine and the code
//! that actually turns text into records. Implementations live in other crates.

use crate::error::{ActionError, TemplateError};
use crate::options::ActionOptions;
use crate::record::FieldMap;

/// Pattern-driven parser keyed by command name
///
/// Implemented by the infrastructure layer (switchlore-templates). The engine
/// never looks inside a template; it only passes text through.
pub trait TemplateParser: Send + Sync {
    /// Parse `data` using the template registered for `platform` + `command`
    ///
    /// Returns [`TemplateError::Unsupported`] when no such template exists.
    fn parse(&self, platform: &str, command: &str, data: &str)
        -> Result<Vec<FieldMap>, TemplateError>;

    /// Whether a template exists, without parsing anything
    fn supports(&self, platform: &str, command: &str) -> bool;
}

/// Everything a custom action sees for one (file, spec) execution
#[derive(Debug, Clone, Copy)]
pub struct ActionInput<'a> {
    /// Section identifier from the command specification
    pub section: &'a str,

    /// Text the action runs over (a named section or the whole file)
    pub text: &'a str,

    /// Options from the command specification
    pub options: &'a ActionOptions,

    /// Whether the caller wants a `raw` column on each record
    pub include_raw: bool,
}

/// A named, pluggable extraction strategy
///
/// Implemented by the application layer (switchlore-extractor) and by callers
/// who register their own actions. Implementations must be pure: the engine
/// runs them concurrently across files.
pub trait ExtractionAction: Send + Sync {
    /// Check the recognized options before any file is touched
    ///
    /// Unrecognized keys must be ignored.
    fn validate_options(&self, _section: &str, _options: &ActionOptions) -> Result<(), ActionError> {
        Ok(())
    }

    /// Extract records from one piece of text
    fn extract(&self, input: &ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError>;
}
