//! Per-file executor
//!
//! Runs every normalized specification against one file. Failures are
//! recorded per (file, spec) pair and never stop the remaining specs.

use crate::adapter::parse_with_template;
use crate::config::ExtractorConfig;
use crate::sections::split_sections;
use crate::types::{ActionKind, CommandSpec, ExtractionFailure, FailureKind};
use switchlore_domain::{ActionInput, ConfigFile, ExtractionRow, FieldMap, TemplateParser};
use tracing::{debug, warn};

/// Column added by `include_command`
pub(crate) const COMMAND_FIELD: &str = "command";

/// Column added by `include_raw`
pub(crate) const RAW_FIELD: &str = "raw";

/// Shared, read-only state for executing files
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Template parser for plain commands
    pub templates: &'a dyn TemplateParser,

    /// Engine configuration
    pub config: &'a ExtractorConfig,
}

/// Everything one file produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileOutcome {
    /// Rows in spec order
    pub rows: Vec<ExtractionRow>,

    /// Failed (file, spec) pairs in spec order
    pub failures: Vec<ExtractionFailure>,
}

/// Execute `specs` in order against one file
pub fn execute_file(
    file: &ConfigFile,
    specs: &[CommandSpec],
    ctx: &ExecutionContext<'_>,
) -> FileOutcome {
    let mut outcome = FileOutcome::default();
    let source = file.identifier();

    if file.content().len() > ctx.config.max_text_length {
        warn!(
            "Skipping {}: {} bytes exceeds limit of {}",
            source,
            file.content().len(),
            ctx.config.max_text_length
        );
        for spec in specs {
            outcome.failures.push(failure(
                source,
                spec,
                FailureKind::Extraction,
                format!("file exceeds {} bytes", ctx.config.max_text_length),
            ));
        }
        return outcome;
    }

    let sections = if ctx.config.split_sections {
        split_sections(file.content())
    } else {
        Default::default()
    };

    for spec in specs {
        let text = match sections.get(&spec.section) {
            Some(content) => content.as_str(),
            None if sections.is_empty() || !spec.action.is_template() => file.content(),
            None => {
                debug!("{}: no '{}' section, skipping template", source, spec.section);
                continue;
            }
        };

        let records = match &spec.action {
            ActionKind::Template => {
                parse_with_template(ctx.templates, &ctx.config.platform, &spec.section, text)
            }
            ActionKind::Custom { strategy, .. } => strategy
                .extract(&ActionInput {
                    section: &spec.section,
                    text,
                    options: &spec.options,
                    include_raw: ctx.config.include_raw,
                })
                .map_err(|e| (FailureKind::Extraction, e.to_string())),
        };

        match records.and_then(|records| stamp(records, spec, text, source, ctx.config)) {
            Ok(rows) => {
                debug!("{}: '{}' produced {} row(s)", source, spec.section, rows.len());
                outcome.rows.extend(rows);
            }
            Err((kind, reason)) => {
                debug!("{}: '{}' failed: {}", source, spec.section, reason);
                outcome.failures.push(failure(source, spec, kind, reason));
            }
        }
    }

    outcome
}

/// Enrich and stamp one pair's records; all or nothing
fn stamp(
    records: Vec<FieldMap>,
    spec: &CommandSpec,
    text: &str,
    source: &str,
    config: &ExtractorConfig,
) -> Result<Vec<ExtractionRow>, (FailureKind, String)> {
    records
        .into_iter()
        .map(|record| {
            let mut record = if config.include_command && !record.contains_key(COMMAND_FIELD) {
                let mut enriched = FieldMap::with_capacity(record.len() + 1);
                enriched.insert(COMMAND_FIELD.to_string(), spec.section.clone());
                enriched.extend(record);
                enriched
            } else {
                record
            };
            if config.include_raw && !record.contains_key(RAW_FIELD) {
                record.insert(RAW_FIELD.to_string(), text.to_string());
            }
            ExtractionRow::with_provenance(record, source)
                .map_err(|e| (FailureKind::Extraction, e.to_string()))
        })
        .collect()
}

fn failure(source: &str, spec: &CommandSpec, kind: FailureKind, reason: String) -> ExtractionFailure {
    ExtractionFailure {
        source_file: source.to_string(),
        section: spec.section.clone(),
        action: spec.action.name().to_string(),
        kind,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::FnAction;
    use std::sync::Arc;
    use switchlore_domain::ActionOptions;
    use switchlore_templates::MockTemplates;

    fn template(section: &str) -> CommandSpec {
        CommandSpec {
            section: section.to_string(),
            action: ActionKind::Template,
            options: ActionOptions::new(),
        }
    }

    fn custom<F>(section: &str, f: F) -> CommandSpec
    where
        F: Fn(&ActionInput<'_>) -> Result<Vec<FieldMap>, switchlore_domain::ActionError>
            + Send
            + Sync
            + 'static,
    {
        CommandSpec {
            section: section.to_string(),
            action: ActionKind::Custom {
                name: "custom".to_string(),
                strategy: Arc::new(FnAction::new(f)),
            },
            options: ActionOptions::new(),
        }
    }

    fn record(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(file: &ConfigFile, specs: &[CommandSpec], templates: &MockTemplates, config: &ExtractorConfig) -> FileOutcome {
        let ctx = ExecutionContext { templates, config };
        execute_file(file, specs, &ctx)
    }

    #[test]
    fn test_failure_does_not_stop_later_specs() {
        let file = ConfigFile::new("sw1.cfg", "interface Gi0/1\n");
        let specs = vec![
            template("show clock"),
            custom("interface", |_| Ok(vec![record(&[("interface", "Gi0/1")])])),
        ];
        let outcome = run(&file, &specs, &MockTemplates::new(), &ExtractorConfig::default());

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind, FailureKind::UnsupportedSection);
        assert_eq!(outcome.failures[0].action, "parse");
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].source_file(), "sw1.cfg");
    }

    #[test]
    fn test_strategy_emitting_source_file_fails_the_pair() {
        let file = ConfigFile::new("sw1.cfg", "x");
        let specs = vec![custom("x", |_| {
            Ok(vec![
                record(&[("a", "1")]),
                record(&[("source_file", "forged")]),
            ])
        })];
        let outcome = run(&file, &specs, &MockTemplates::new(), &ExtractorConfig::default());

        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.failures[0].kind, FailureKind::Extraction);
        assert!(outcome.failures[0].reason.contains("source_file"));
    }

    #[test]
    fn test_section_text_goes_to_matching_spec() {
        let mut templates = MockTemplates::new();
        templates.add_response("show version", vec![record(&[("version", "15.2")])]);
        let file = ConfigFile::new(
            "sw1.cfg",
            "--- show version\nVersion 15.2\n--- show running-config\ninterface Gi0/1\n",
        );
        let seen = Arc::new(std::sync::Mutex::new(String::new()));
        let captured = Arc::clone(&seen);
        let specs = vec![
            template("show version"),
            template("show inventory"),
            custom("interface", move |input| {
                *captured.lock().unwrap() = input.text.to_string();
                Ok(Vec::new())
            }),
        ];
        let outcome = run(&file, &specs, &templates, &ExtractorConfig::default());

        assert_eq!(outcome.rows.len(), 1);
        assert!(outcome.failures.is_empty());
        assert_eq!(templates.calls()[0].data, "Version 15.2");
        assert_eq!(templates.call_count(), 1);
        assert!(seen.lock().unwrap().contains("--- show running-config"));
    }

    #[test]
    fn test_command_and_raw_enrichment() {
        let mut templates = MockTemplates::new();
        templates.add_response("show version", vec![record(&[("version", "15.2")])]);
        let file = ConfigFile::new("sw1.cfg", "Version 15.2");
        let outcome = run(
            &file,
            &[template("show version")],
            &templates,
            &ExtractorConfig::verbose(),
        );

        let row = &outcome.rows[0];
        let names: Vec<&str> = row.field_names().collect();
        assert_eq!(names, vec!["command", "version", "raw", "source_file"]);
        assert_eq!(row.get("command"), Some("show version"));
        assert_eq!(row.get("raw"), Some("Version 15.2"));
    }

    #[test]
    fn test_oversized_file_fails_every_spec() {
        let config = ExtractorConfig {
            max_text_length: 4,
            ..ExtractorConfig::default()
        };
        let file = ConfigFile::new("big.cfg", "hostname big\n");
        let outcome = run(
            &file,
            &[template("show version"), template("show inventory")],
            &MockTemplates::new(),
            &config,
        );
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.rows.is_empty());
    }
}
