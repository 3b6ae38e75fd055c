//! Regex-per-command template parser
//!
//! Templates are declared in TOML and keyed by platform + command:
//!
//! ```toml
//! # One record per match; named groups become fields
//! [[template]]
//! platform = "cisco_ios"
//! command = "show ip interface brief"
//! pattern = '^(?P<interface>\S+)\s+(?P<ip_address>\S+)\s+\S+\s+\S+\s+(?P<status>up|down)\s+(?P<protocol>up|down)\s*$'
//!
//! # One record per text; each field has its own regex, group 1 is the value
//! [[template]]
//! command = "show version"
//! [template.fields]
//! version = 'Version ([^,\s]+)'
//! hostname = '^(\S+) uptime is'
//! ```
//!
//! All patterns are compiled in multi-line mode, so `^`/`$` anchor on lines.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use switchlore_domain::{FieldMap, TemplateError, TemplateParser};
use tracing::debug;

/// Platform assumed when a template or a query does not name one
pub const DEFAULT_PLATFORM: &str = "cisco_ios";

const BUILTIN_TEMPLATES: &str = include_str!("../templates/cisco_ios.toml");

/// How a `pattern` template turns matches into records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// One record per match
    #[default]
    Each,
    /// A single record from the first match
    First,
}

/// A template as written in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDef {
    /// Network operating system the template applies to
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Command (section name) the template parses
    pub command: String,

    /// Row pattern with named capture groups
    #[serde(default)]
    pub pattern: Option<String>,

    /// Match mode for `pattern`
    #[serde(default)]
    pub mode: MatchMode,

    /// Per-field patterns producing a single record
    #[serde(default)]
    pub fields: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default, rename = "template")]
    templates: Vec<TemplateDef>,
}

#[derive(Debug)]
enum Compiled {
    Rows { regex: Regex, mode: MatchMode },
    Fields(Vec<(String, Regex)>),
}

/// Template parser backed by regular expressions
#[derive(Debug, Default)]
pub struct RegexTemplates {
    templates: HashMap<(String, String), Compiled>,
}

impl RegexTemplates {
    /// Create a parser with no templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser preloaded with the templates shipped in this crate
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_toml(BUILTIN_TEMPLATES)
    }

    /// Load templates from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, TemplateError> {
        let mut templates = Self::new();
        templates.extend_from_toml(toml_str)?;
        Ok(templates)
    }

    /// Load templates from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let mut templates = Self::new();
        templates.extend_from_path(path)?;
        Ok(templates)
    }

    /// Add every template from a TOML string, replacing same-keyed ones
    pub fn extend_from_toml(&mut self, toml_str: &str) -> Result<(), TemplateError> {
        let file: TemplateFile = toml::from_str(toml_str)
            .map_err(|e| TemplateError::Load(format!("Failed to parse TOML: {}", e)))?;
        for def in file.templates {
            self.add(def)?;
        }
        Ok(())
    }

    /// Add every template from a TOML file
    pub fn extend_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), TemplateError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| TemplateError::Load(format!("{}: {}", path.display(), e)))?;
        self.extend_from_toml(&contents)
    }

    /// Compile and register one template
    pub fn add(&mut self, def: TemplateDef) -> Result<(), TemplateError> {
        let compiled = match (&def.pattern, &def.fields) {
            (Some(pattern), None) => Compiled::Rows {
                regex: compile(&def.command, pattern)?,
                mode: def.mode,
            },
            (None, Some(fields)) => {
                let mut compiled = fields
                    .iter()
                    .map(|(name, pattern)| Ok((name.clone(), compile(&def.command, pattern)?)))
                    .collect::<Result<Vec<_>, TemplateError>>()?;
                // HashMap order is arbitrary; keep columns stable
                compiled.sort_by(|a, b| a.0.cmp(&b.0));
                Compiled::Fields(compiled)
            }
            _ => {
                return Err(TemplateError::Load(format!(
                    "template '{}' must define exactly one of 'pattern' or 'fields'",
                    def.command
                )))
            }
        };

        debug!("Registered template '{}' for {}", def.command, def.platform);
        self.templates.insert(key(&def.platform, &def.command), compiled);
        Ok(())
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no templates are registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateParser for RegexTemplates {
    fn parse(
        &self,
        platform: &str,
        command: &str,
        data: &str,
    ) -> Result<Vec<FieldMap>, TemplateError> {
        let template = self
            .templates
            .get(&key(platform, command))
            .ok_or_else(|| TemplateError::Unsupported {
                platform: platform.to_string(),
                command: command.to_string(),
            })?;

        let records = match template {
            Compiled::Rows { regex, mode } => {
                let names: Vec<&str> = regex.capture_names().flatten().collect();
                let mut records = Vec::new();
                for caps in regex.captures_iter(data) {
                    let record: FieldMap = names
                        .iter()
                        .map(|name| {
                            let value = caps.name(name).map_or("", |m| m.as_str().trim());
                            (name.to_string(), value.to_string())
                        })
                        .collect();
                    records.push(record);
                    if *mode == MatchMode::First {
                        break;
                    }
                }
                records
            }
            Compiled::Fields(fields) => {
                let record: FieldMap = fields
                    .iter()
                    .map(|(name, regex)| {
                        let value = regex
                            .captures(data)
                            .and_then(|caps| caps.get(1))
                            .map_or("", |m| m.as_str().trim());
                        (name.clone(), value.to_string())
                    })
                    .collect();
                if record.values().all(String::is_empty) {
                    Vec::new()
                } else {
                    vec![record]
                }
            }
        };

        debug!(
            "Template '{}' produced {} record(s) from {} bytes",
            command,
            records.len(),
            data.len()
        );
        Ok(records)
    }

    fn supports(&self, platform: &str, command: &str) -> bool {
        self.templates.contains_key(&key(platform, command))
    }
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

/// Lookup key: platform and command are case-insensitive and whitespace-normalized
fn key(platform: &str, command: &str) -> (String, String) {
    let command = command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    (platform.trim().to_lowercase(), command)
}

fn compile(command: &str, pattern: &str) -> Result<Regex, TemplateError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| TemplateError::Load(format!("template '{}': {}", command, e)))
}
