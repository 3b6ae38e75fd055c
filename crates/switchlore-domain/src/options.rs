//! Action options
//!
//! Options are an open mapping: each action reads the keys it recognizes and
//! ignores the rest, so older actions keep working when specs grow new keys.

use crate::error::ActionError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option mapping attached to a structured command specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionOptions(IndexMap<String, Value>);

impl ActionOptions {
    /// Create an empty option mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// # Examples
    ///
    /// ```
    /// use switchlore_domain::ActionOptions;
    ///
    /// let options = ActionOptions::new().with("terminators", vec!["exit"]);
    /// assert_eq!(
    ///     options.string_list("terminators").unwrap(),
    ///     Some(vec!["exit".to_string()])
    /// );
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the option is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no options were supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Read an option that must be a list of strings
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, ActionError> {
        let Some(value) = self.0.get(key) else {
            return Ok(None);
        };

        let items = value
            .as_array()
            .ok_or_else(|| invalid(key, "expected a list of strings"))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(key, format!("expected string, found {}", item)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Read an option that must be a string
    pub fn string(&self, key: &str) -> Result<Option<&str>, ActionError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(invalid(key, format!("expected string, found {}", other))),
        }
    }

    /// Read an option that must be a boolean
    pub fn flag(&self, key: &str) -> Result<Option<bool>, ActionError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(invalid(key, format!("expected boolean, found {}", other))),
        }
    }
}

impl FromIterator<(String, Value)> for ActionOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ActionError {
    ActionError::InvalidOption {
        key: key.to_string(),
        reason: reason.into(),
    }
}
