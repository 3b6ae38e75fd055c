//! Query command implementation.

use crate::cli::QueryArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use std::time::Duration;
use switchlore_extractor::{CommandInput, ExtractorConfig, IngestOptions, QueryEngine, QueryInput};
use switchlore_templates::RegexTemplates;
use tracing::debug;

/// Execute the query command.
pub async fn execute_query(args: QueryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let input = build_input(&args)?;
    let extractor = extractor_config(&args, &config.extractor);
    let templates = load_templates(
        args.templates
            .as_deref()
            .or(config.settings.templates.as_deref()),
    )?;
    let engine = QueryEngine::new(templates, extractor)?;

    let ingest = IngestOptions {
        extension: args.extension,
        exclude: args.exclude,
    };
    let sources = args.sources;
    let timeout_secs = config.settings.query_timeout_secs;

    // File work is CPU-bound; keep it off the async runtime.
    let task = tokio::task::spawn_blocking(move || engine.query_paths(&sources, &ingest, input));
    let joined = if timeout_secs == 0 {
        task.await
    } else {
        tokio::time::timeout(Duration::from_secs(timeout_secs), task)
            .await
            .map_err(|_| CliError::Timeout(timeout_secs))?
    };
    let result = joined.map_err(|e| CliError::Task(e.to_string()))??;

    println!("{}", formatter.format_result(&result)?);

    if !formatter.is_quiet() {
        if result.has_failures() {
            eprintln!("{}", formatter.format_failures(&result.failures));
        }
        eprintln!("{}", formatter.query_summary(&result));
    }

    Ok(())
}

/// Collect `--command`, `--spec` and `--spec-file` into one ordered input.
///
/// Plain commands come first, then inline specs, then the spec file.
pub fn build_input(args: &QueryArgs) -> Result<QueryInput> {
    let mut items: Vec<CommandInput> = args
        .commands
        .iter()
        .map(|command| CommandInput::from(command.as_str()))
        .collect();

    for spec in &args.specs {
        items.extend(QueryInput::from_json(spec)?.into_items());
    }

    if let Some(path) = &args.spec_file {
        items.extend(read_spec_file(path)?.into_items());
    }

    if items.is_empty() {
        return Err(CliError::InvalidInput(
            "provide at least one --command, --spec or --spec-file".to_string(),
        ));
    }

    debug!("Query input has {} command(s)", items.len());
    Ok(QueryInput::Many(items))
}

/// Read a JSON or TOML specification file, chosen by extension.
pub fn read_spec_file(path: &Path) -> Result<QueryInput> {
    let contents = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let input = if is_toml {
        QueryInput::from_toml(&contents)
    } else {
        QueryInput::from_json(&contents)
    };
    input.map_err(|e| CliError::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Apply command-line overrides on top of the configured engine settings.
pub fn extractor_config(args: &QueryArgs, base: &ExtractorConfig) -> ExtractorConfig {
    let mut config = base.clone();
    if let Some(platform) = &args.platform {
        config.platform = platform.clone();
    }
    config.include_raw |= args.include_raw;
    config.include_command |= args.include_command;
    config.strict |= args.strict;
    if args.sequential {
        config.parallel = false;
    }
    config
}

/// Built-in templates plus an optional definitions file.
pub fn load_templates(extra: Option<&Path>) -> Result<RegexTemplates> {
    let mut templates = RegexTemplates::builtin()?;
    if let Some(path) = extra {
        templates.extend_from_path(path)?;
        debug!("Loaded templates from {}", path.display());
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn query_args(argv: &[&str]) -> QueryArgs {
        let mut full = vec!["switchlore", "query", "sw1.cfg"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Query(args) => args,
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_input_order() {
        let args = query_args(&[
            "-s",
            r#"{"section": "interface", "action": "capture_block_config"}"#,
            "-c",
            "show version",
        ]);
        let items = build_input(&args).unwrap().into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], CommandInput::from("show version"));
        assert!(matches!(items[1], CommandInput::Structured(_)));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let args = query_args(&[]);
        assert!(matches!(build_input(&args), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_inline_spec() {
        let args = query_args(&["-s", "{not json"]);
        assert!(matches!(build_input(&args), Err(CliError::Query(_))));
    }

    #[test]
    fn test_overrides() {
        let args = query_args(&["-p", "arista_eos", "--strict", "--sequential"]);
        let config = extractor_config(&args, &ExtractorConfig::verbose());
        assert_eq!(config.platform, "arista_eos");
        assert!(config.strict);
        assert!(!config.parallel);
        assert!(config.include_raw);
    }
}
