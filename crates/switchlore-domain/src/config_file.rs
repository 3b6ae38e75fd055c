//! Ingested configuration files

use std::fmt;

/// One switch configuration file, as handed over by the ingestion layer.
///
/// Immutable once built; queries only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    identifier: String,
    content: String,
}

impl ConfigFile {
    /// Create a config file from an identifier (path or logical name) and its text
    ///
    /// # Examples
    ///
    /// ```
    /// use switchlore_domain::ConfigFile;
    ///
    /// let file = ConfigFile::new("sw1.cfg", "hostname sw1\n");
    /// assert_eq!(file.identifier(), "sw1.cfg");
    /// assert_eq!(file.lines().count(), 1);
    /// ```
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }

    /// Identifier stamped on every row extracted from this file
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Raw text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Iterate over the lines of the content
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.content.lines()
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.identifier, self.content.len())
    }
}
