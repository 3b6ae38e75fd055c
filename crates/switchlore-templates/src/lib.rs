//! SwitchLore Template Layer
//!
//! Pluggable template parsers behind the `TemplateParser` trait from
//! `switchlore-domain`.
//!
//! # Parsers
//!
//! - `MockTemplates`: Deterministic canned records for testing
//! - `RegexTemplates`: Regex-per-command templates loaded from TOML
//!
//! # Examples
//!
//! ```
//! use switchlore_templates::MockTemplates;
//! use switchlore_domain::{FieldMap, TemplateParser};
//!
//! let mut templates = MockTemplates::new();
//! let mut record = FieldMap::new();
//! record.insert("version".into(), "15.2(4)E".into());
//! templates.add_response("show version", vec![record]);
//!
//! let rows = templates.parse("cisco_ios", "show version", "...").unwrap();
//! assert_eq!(rows[0]["version"], "15.2(4)E");
//! assert!(templates.parse("cisco_ios", "show clock", "...").is_err());
//! ```

#![warn(missing_docs)]

pub mod regex_templates;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use switchlore_domain::{FieldMap, TemplateError, TemplateParser};

pub use regex_templates::{MatchMode, RegexTemplates, TemplateDef, DEFAULT_PLATFORM};

/// A call recorded by [`MockTemplates`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCall {
    /// Platform passed to `parse`
    pub platform: String,
    /// Command passed to `parse`
    pub command: String,
    /// Text passed to `parse`
    pub data: String,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Rows(Vec<FieldMap>),
    Error(String),
}

/// Mock template parser for deterministic testing
///
/// Commands without a configured response are reported as unsupported, which
/// is what a real template library does for unknown commands.
#[derive(Debug, Clone, Default)]
pub struct MockTemplates {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<TemplateCall>>>,
}

impl MockTemplates {
    /// Create a mock with no templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `rows` whenever `command` is parsed
    pub fn add_response(&mut self, command: impl Into<String>, rows: Vec<FieldMap>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(command.into(), MockResponse::Rows(rows));
    }

    /// Fail with a parse error whenever `command` is parsed
    pub fn add_error(&mut self, command: impl Into<String>, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(command.into(), MockResponse::Error(message.into()));
    }

    /// Get the number of times parse was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Every call seen so far, in order
    pub fn calls(&self) -> Vec<TemplateCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reset the call log
    pub fn reset_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TemplateParser for MockTemplates {
    fn parse(
        &self,
        platform: &str,
        command: &str,
        data: &str,
    ) -> Result<Vec<FieldMap>, TemplateError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TemplateCall {
                platform: platform.to_string(),
                command: command.to_string(),
                data: data.to_string(),
            });

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(command) {
            Some(MockResponse::Rows(rows)) => Ok(rows.clone()),
            Some(MockResponse::Error(message)) => Err(TemplateError::Parse(message.clone())),
            None => Err(TemplateError::Unsupported {
                platform: platform.to_string(),
                command: command.to_string(),
            }),
        }
    }

    fn supports(&self, _platform: &str, command: &str) -> bool {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(command)
    }
}
