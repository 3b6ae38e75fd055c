//! Built-in extraction actions

use crate::attributes::parse_attributes;
use crate::segment::{segment_blocks, BlockRules, BlockStart};
use regex::Regex;
use std::fmt;
use switchlore_domain::{ActionError, ActionInput, ActionOptions, ExtractionAction, FieldMap};

const CONFIG_FIELD: &str = "config";
const CONFIGURATION_FIELD: &str = "configuration";
const RAW_FIELD: &str = "raw";
const DEFAULT_NAME_FIELD: &str = "interface";
const INTERFACE_PATTERN: &str = r"^interface\s+(.+)$";
const INTERFACE_TERMINATORS: &[&str] = &["!", "exit", "quit", "end"];

/// Captures named configuration blocks
///
/// Each block becomes one record holding the block name and its body. The
/// two built-in flavours differ only in their defaults:
///
/// | option | `block_config` | `interface_config` |
/// |---|---|---|
/// | `terminators` | none | `!`, `exit`, `quit`, `end` |
/// | `pattern` / `interface_pattern` | section prefix | `^interface\s+(.+)$` |
/// | `close_on_unindented` | false | true |
/// | `parse_attributes` | false | true |
/// | `include_configuration` | false | true |
///
/// `name_field` (default `interface`) names the block-name column.
/// `include_configuration` adds a `configuration` column holding the whole
/// block, start line included.
#[derive(Debug, Clone)]
pub struct BlockCaptureAction {
    pattern: Option<Regex>,
    terminators: Vec<String>,
    close_on_unindented: bool,
    parse_attributes: bool,
    include_configuration: bool,
}

/// Options resolved against the action's defaults
struct Settings {
    rules: BlockRules,
    name_field: String,
    parse_attributes: bool,
    include_configuration: bool,
}

impl BlockCaptureAction {
    /// Generic capture: blocks start with the section word
    pub fn block_config() -> Self {
        Self {
            pattern: None,
            terminators: Vec::new(),
            close_on_unindented: false,
            parse_attributes: false,
            include_configuration: false,
        }
    }

    /// Interface stanzas with attribute columns
    pub fn interface_config() -> Self {
        Self {
            pattern: Regex::new(INTERFACE_PATTERN).ok(),
            terminators: INTERFACE_TERMINATORS.iter().map(|t| t.to_string()).collect(),
            close_on_unindented: true,
            parse_attributes: true,
            include_configuration: true,
        }
    }

    fn settings(&self, section: &str, options: &ActionOptions) -> Result<Settings, ActionError> {
        let start = match pattern_option(options)? {
            Some(regex) => BlockStart::Pattern(regex),
            None => match &self.pattern {
                Some(regex) => BlockStart::Pattern(regex.clone()),
                None => {
                    if section.trim().is_empty() {
                        return Err(ActionError::Malformed(
                            "block capture needs a non-empty section".to_string(),
                        ));
                    }
                    BlockStart::Prefix(section.trim().to_string())
                }
            },
        };

        let terminators = options
            .string_list("terminators")?
            .unwrap_or_else(|| self.terminators.clone());

        let name_field = match options.string("name_field")? {
            Some(name) if name.trim().is_empty() => {
                return Err(ActionError::InvalidOption {
                    key: "name_field".to_string(),
                    reason: "must not be empty".to_string(),
                })
            }
            Some(name) => name.trim().to_string(),
            None => DEFAULT_NAME_FIELD.to_string(),
        };

        Ok(Settings {
            rules: BlockRules {
                start,
                terminators,
                close_on_unindented: options
                    .flag("close_on_unindented")?
                    .unwrap_or(self.close_on_unindented),
            },
            name_field,
            parse_attributes: options
                .flag("parse_attributes")?
                .unwrap_or(self.parse_attributes),
            include_configuration: options
                .flag("include_configuration")?
                .unwrap_or(self.include_configuration),
        })
    }
}

fn pattern_option(options: &ActionOptions) -> Result<Option<Regex>, ActionError> {
    for key in ["pattern", "interface_pattern"] {
        if let Some(pattern) = options.string(key)? {
            return Regex::new(pattern)
                .map(Some)
                .map_err(|e| ActionError::InvalidOption {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
        }
    }
    Ok(None)
}

impl ExtractionAction for BlockCaptureAction {
    fn validate_options(&self, section: &str, options: &ActionOptions) -> Result<(), ActionError> {
        self.settings(section, options).map(|_| ())
    }

    fn extract(&self, input: &ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError> {
        let settings = self.settings(input.section, input.options)?;
        let reserved = [
            settings.name_field.as_str(),
            CONFIG_FIELD,
            CONFIGURATION_FIELD,
            RAW_FIELD,
            "command",
            switchlore_domain::SOURCE_FILE_FIELD,
        ];

        let records = segment_blocks(input.text, &settings.rules)
            .into_iter()
            .map(|block| {
                let mut record = FieldMap::new();
                record.insert(settings.name_field.clone(), block.name.to_string());
                record.insert(CONFIG_FIELD.to_string(), block.config());
                if settings.include_configuration {
                    record.insert(CONFIGURATION_FIELD.to_string(), block.raw());
                }
                if input.include_raw {
                    record.insert(RAW_FIELD.to_string(), block.raw());
                }
                if settings.parse_attributes {
                    record.extend(parse_attributes(block.body.iter().copied(), &reserved));
                }
                record
            })
            .collect();

        Ok(records)
    }
}

/// Adapts a closure into an [`ExtractionAction`]
///
/// Usually reached through [`ActionRegistry::register_fn`](crate::ActionRegistry::register_fn).
///
/// # Examples
///
/// ```
/// use switchlore_domain::FieldMap;
/// use switchlore_extractor::ActionRegistry;
///
/// let mut registry = ActionRegistry::with_builtins();
/// registry
///     .register_fn("line_count", |input| {
///         let mut row = FieldMap::new();
///         row.insert("lines".into(), input.text.lines().count().to_string());
///         Ok(vec![row])
///     })
///     .unwrap();
/// assert!(registry.contains("line_count"));
/// ```
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F>
where
    F: Fn(&ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError> + Send + Sync,
{
    /// Wrap a closure
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ExtractionAction for FnAction<F>
where
    F: Fn(&ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError> + Send + Sync,
{
    fn extract(&self, input: &ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError> {
        (self.f)(input)
    }
}

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction").finish_non_exhaustive()
    }
}
