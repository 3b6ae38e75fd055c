//! Request and response types for queries

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use switchlore_domain::{ActionOptions, ExtractionAction, ExtractionRow, Table, SOURCE_FILE_FIELD};

/// One element of caller input: a plain command or a structured request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandInput {
    /// Plain command name, parsed with the template layer
    Command(String),

    /// Section + action + options
    Structured(StructuredSpec),
}

/// A structured command specification as supplied by the caller
///
/// Every field is optional at this stage; normalization decides what is
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredSpec {
    /// Command or section identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Registered action name; template parsing when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Action-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ActionOptions>,
}

impl StructuredSpec {
    /// Start a spec for a section
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            ..Self::default()
        }
    }

    /// Set the action name
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the options
    pub fn with_options(mut self, options: ActionOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Caller input for a whole query: one element or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryInput {
    /// Several, freely mixed
    ///
    /// Listed first so arrays never bind positionally to a structured spec.
    Many(Vec<CommandInput>),

    /// A single command or spec
    One(CommandInput),
}

#[derive(Debug, Deserialize)]
struct SpecDocument {
    commands: QueryInput,
}

impl QueryInput {
    /// Parse query input from JSON (a string, an object, or an array of either)
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse query input from a TOML document with a top-level `commands` key
    ///
    /// ```toml
    /// commands = [
    ///     "show version",
    ///     { section = "interface", action = "capture_block_config", options = { terminators = ["exit"] } },
    /// ]
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, QueryError> {
        let document: SpecDocument = toml::from_str(toml_str)?;
        Ok(document.commands)
    }

    /// Flatten into an ordered list
    pub fn into_items(self) -> Vec<CommandInput> {
        match self {
            QueryInput::One(item) => vec![item],
            QueryInput::Many(items) => items,
        }
    }
}

impl From<&str> for CommandInput {
    fn from(command: &str) -> Self {
        CommandInput::Command(command.to_string())
    }
}

impl From<String> for CommandInput {
    fn from(command: String) -> Self {
        CommandInput::Command(command)
    }
}

impl From<StructuredSpec> for CommandInput {
    fn from(spec: StructuredSpec) -> Self {
        CommandInput::Structured(spec)
    }
}

impl From<&str> for QueryInput {
    fn from(command: &str) -> Self {
        QueryInput::One(command.into())
    }
}

impl From<String> for QueryInput {
    fn from(command: String) -> Self {
        QueryInput::One(command.into())
    }
}

impl From<StructuredSpec> for QueryInput {
    fn from(spec: StructuredSpec) -> Self {
        QueryInput::One(spec.into())
    }
}

impl From<CommandInput> for QueryInput {
    fn from(item: CommandInput) -> Self {
        QueryInput::One(item)
    }
}

impl<T: Into<CommandInput>> From<Vec<T>> for QueryInput {
    fn from(items: Vec<T>) -> Self {
        QueryInput::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Extraction strategy resolved at normalization time
#[derive(Clone)]
pub enum ActionKind {
    /// Hand the text to the template parser
    Template,

    /// Run a registered action
    Custom {
        /// Registry name
        name: String,
        /// The strategy itself
        strategy: Arc<dyn ExtractionAction>,
    },
}

impl ActionKind {
    /// Name used in logs and failure reports
    pub fn name(&self) -> &str {
        match self {
            ActionKind::Template => crate::registry::TEMPLATE_ACTION,
            ActionKind::Custom { name, .. } => name,
        }
    }

    /// True for template parsing
    pub fn is_template(&self) -> bool {
        matches!(self, ActionKind::Template)
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Template => write!(f, "Template"),
            ActionKind::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

impl PartialEq for ActionKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ActionKind::Template, ActionKind::Template) => true,
            (ActionKind::Custom { name: a, .. }, ActionKind::Custom { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// A normalized command specification
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    /// Non-empty, trimmed section identifier
    pub section: String,

    /// Resolved strategy
    pub action: ActionKind,

    /// Options, empty when none were given
    pub options: ActionOptions,
}

/// Category of a per-(file, spec) failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No template exists for the section
    UnsupportedSection,

    /// The strategy failed on this file's content
    Extraction,
}

impl FailureKind {
    /// Short name for display
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnsupportedSection => "unsupported_section",
            FailureKind::Extraction => "extraction",
        }
    }
}

/// A (file, spec) pair that produced no rows because something went wrong
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// File the failure happened on
    pub source_file: String,

    /// Section of the failing spec
    pub section: String,

    /// Action of the failing spec
    pub action: String,

    /// What kind of failure
    pub kind: FailureKind,

    /// Human-readable reason
    pub reason: String,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} / {}] {}: {}",
            self.source_file,
            self.section,
            self.action,
            self.kind.as_str(),
            self.reason
        )
    }
}

/// Metadata about a query run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryMetadata {
    /// Number of files processed
    pub files_processed: usize,

    /// Number of normalized specs
    pub specs: usize,

    /// Wall-clock time in milliseconds
    pub processing_time_ms: u64,

    /// Header used when the query produced no rows
    pub base_columns: Vec<String>,
}

/// Result of a query: rows in file-major, spec-minor order plus failures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    /// Every extracted row
    pub rows: Vec<ExtractionRow>,

    /// Every per-(file, spec) failure, in the same order
    pub failures: Vec<ExtractionFailure>,

    /// Run metadata
    pub metadata: QueryMetadata,
}

impl QueryResult {
    /// True when no rows were produced
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when at least one (file, spec) pair failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Rows extracted from one file
    pub fn rows_for_file<'a>(&'a self, source_file: &'a str) -> impl Iterator<Item = &'a ExtractionRow> {
        self.rows
            .iter()
            .filter(move |row| row.source_file() == source_file)
    }

    /// Materialize the rows as a column-unified table
    pub fn to_table(&self) -> Table {
        if self.rows.is_empty() {
            let columns = if self.metadata.base_columns.is_empty() {
                vec![SOURCE_FILE_FIELD.to_string()]
            } else {
                self.metadata.base_columns.clone()
            };
            return Table::with_columns(columns);
        }
        Table::from_rows(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_plain_string() {
        let input: QueryInput = serde_json::from_value(json!("show version")).unwrap();
        assert_eq!(input, QueryInput::One(CommandInput::Command("show version".into())));
    }

    #[test]
    fn test_deserialize_mixed_list() {
        let input: QueryInput = serde_json::from_value(json!([
            "show version",
            {"section": "interface", "action": "capture_block_config",
             "options": {"terminators": ["exit"]}}
        ]))
        .unwrap();

        let items = input.into_items();
        assert_eq!(items.len(), 2);
        match &items[1] {
            CommandInput::Structured(spec) => {
                assert_eq!(spec.section.as_deref(), Some("interface"));
                assert_eq!(spec.action.as_deref(), Some("capture_block_config"));
                assert!(spec.options.is_some());
            }
            other => panic!("Expected structured spec, got {:?}", other),
        }
    }

    #[test]
    fn test_string_array_is_a_list() {
        let input = QueryInput::from_json(r#"["show version", "show clock"]"#).unwrap();
        assert_eq!(
            input.into_items(),
            vec![
                CommandInput::Command("show version".into()),
                CommandInput::Command("show clock".into()),
            ]
        );
    }

    #[test]
    fn test_non_string_section_is_rejected() {
        let result = QueryInput::from_json(r#"[{"section": 42}]"#);
        assert!(matches!(result, Err(QueryError::InvalidSpec(_))));
    }

    #[test]
    fn test_missing_section_deserializes_for_normalizer() {
        let input = QueryInput::from_json(r#"{"action": "capture_interface_config"}"#).unwrap();
        match input {
            QueryInput::One(CommandInput::Structured(spec)) => assert!(spec.section.is_none()),
            other => panic!("Expected structured spec, got {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_document() {
        let input = QueryInput::from_toml(
            r#"
commands = [
    "show version",
    { section = "interface", action = "capture_block_config", options = { terminators = ["exit"] } },
]
"#,
        )
        .unwrap();
        assert_eq!(input.into_items().len(), 2);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(QueryInput::from("show version").into_items().len(), 1);
        assert_eq!(
            QueryInput::from(vec!["show version", "show inventory"]).into_items().len(),
            2
        );
        let spec = StructuredSpec::new("interface").with_action("capture_block_config");
        assert_eq!(
            QueryInput::from(spec.clone()),
            QueryInput::One(CommandInput::Structured(spec))
        );
    }

    #[test]
    fn test_empty_result_table_uses_base_columns() {
        let result = QueryResult {
            metadata: QueryMetadata {
                base_columns: vec!["source_file".into(), "command".into()],
                ..QueryMetadata::default()
            },
            ..QueryResult::default()
        };
        let table = result.to_table();
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["source_file", "command"]);
    }

    #[test]
    fn test_failure_display() {
        let failure = ExtractionFailure {
            source_file: "sw1.cfg".into(),
            section: "show clock".into(),
            action: "parse".into(),
            kind: FailureKind::UnsupportedSection,
            reason: "no template".into(),
        };
        assert_eq!(
            failure.to_string(),
            "sw1.cfg [show clock / parse] unsupported_section: no template"
        );
    }
}
