//! Configuration for the query engine

use serde::{Deserialize, Serialize};
use switchlore_templates::DEFAULT_PLATFORM;

/// Configuration for the query engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Network operating system passed to the template parser
    pub platform: String,

    /// Add a `raw` column holding the text each record came from
    pub include_raw: bool,

    /// Add a `command` column holding the spec's section
    pub include_command: bool,

    /// Abort the query on the first per-file failure
    pub strict: bool,

    /// Process files concurrently
    pub parallel: bool,

    /// Split files on `--- show ...` headers and hand each spec its own section
    pub split_sections: bool,

    /// Maximum file size (bytes); larger files are reported as failures
    pub max_text_length: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.platform.trim().is_empty() {
            return Err("platform must not be empty".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration: lenient, parallel, no extra columns
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            include_raw: false,
            include_command: false,
            strict: false,
            parallel: true,
            split_sections: true,
            max_text_length: 16 * 1024 * 1024,
        }
    }
}

impl ExtractorConfig {
    /// Fail-fast preset: first failure aborts, files processed in order
    pub fn fail_fast() -> Self {
        Self {
            strict: true,
            parallel: false,
            ..Self::default()
        }
    }

    /// Verbose preset: every row says which command produced it and from what text
    pub fn verbose() -> Self {
        Self {
            include_raw: true,
            include_command: true,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
