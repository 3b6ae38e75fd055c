//! Command specification normalizer
//!
//! Resolves caller input into [`CommandSpec`]s before any file is touched,
//! so a bad request fails the whole query up front.

use crate::error::QueryError;
use crate::registry::{ActionRegistry, TEMPLATE_ACTION};
use crate::types::{ActionKind, CommandInput, CommandSpec, QueryInput, StructuredSpec};
use switchlore_domain::ActionOptions;
use tracing::debug;

/// Normalize query input against `registry`
///
/// Plain strings become template requests with no options. Structured
/// requests must name a section; a missing action means template parsing and
/// missing options mean none. Exact duplicates are collapsed to their first
/// occurrence.
///
/// # Examples
///
/// ```
/// use switchlore_extractor::{normalize, ActionRegistry, CommandInput, StructuredSpec};
///
/// let registry = ActionRegistry::with_builtins();
/// let specs = normalize(
///     vec![
///         CommandInput::from(StructuredSpec::new("interface").with_action("capture_block_config")),
///         CommandInput::from("show version"),
///     ],
///     &registry,
/// )
/// .unwrap();
///
/// assert_eq!(specs[0].action.name(), "capture_block_config");
/// assert!(specs[1].action.is_template());
/// ```
pub fn normalize(
    input: impl Into<QueryInput>,
    registry: &ActionRegistry,
) -> Result<Vec<CommandSpec>, QueryError> {
    let items = input.into().into_items();
    if items.is_empty() {
        return Err(QueryError::InvalidSpec(
            "at least one command must be provided".to_string(),
        ));
    }

    let mut specs: Vec<CommandSpec> = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let position = index + 1;
        let spec = match item {
            CommandInput::Command(command) => CommandSpec {
                section: non_empty(&command, position)?,
                action: ActionKind::Template,
                options: ActionOptions::new(),
            },
            CommandInput::Structured(structured) => resolve(structured, registry, position)?,
        };

        if specs.contains(&spec) {
            debug!("Dropping duplicate command #{} ({})", position, spec.section);
            continue;
        }
        specs.push(spec);
    }

    Ok(specs)
}

fn resolve(
    structured: StructuredSpec,
    registry: &ActionRegistry,
    position: usize,
) -> Result<CommandSpec, QueryError> {
    let section = match structured.section.as_deref() {
        Some(section) => non_empty(section, position)?,
        None => {
            return Err(QueryError::InvalidSpec(format!(
                "command #{}: structured specification requires a 'section'",
                position
            )))
        }
    };
    let options = structured.options.unwrap_or_default();

    let action = match structured.action.as_deref().map(str::trim) {
        None | Some(TEMPLATE_ACTION) => ActionKind::Template,
        Some(name) => {
            let strategy = registry.get(name).ok_or_else(|| {
                QueryError::InvalidSpec(format!(
                    "command #{}: unknown action '{}' (registered: {})",
                    position,
                    name,
                    registry.names().join(", ")
                ))
            })?;
            strategy
                .validate_options(&section, &options)
                .map_err(|e| QueryError::InvalidSpec(format!("command #{}: {}", position, e)))?;
            ActionKind::Custom {
                name: name.to_string(),
                strategy,
            }
        }
    };

    Ok(CommandSpec {
        section,
        action,
        options,
    })
}

fn non_empty(section: &str, position: usize) -> Result<String, QueryError> {
    let trimmed = section.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidSpec(format!(
            "command #{}: section must not be empty",
            position
        )));
    }
    Ok(trimmed.to_string())
}
