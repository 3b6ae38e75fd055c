//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SwitchLore CLI - Turn switch configuration captures into tables.
#[derive(Debug, Parser)]
#[command(name = "switchlore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "SWITCHLORE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (row counts per file)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run commands against configuration files
    Query(QueryArgs),

    /// List the `--- show ...` sections found in each file
    Sections(SectionsArgs),

    /// List the registered extraction actions
    Actions,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Files or directories to query
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Command to parse with a template (repeatable)
    #[arg(short = 'c', long = "command")]
    pub commands: Vec<String>,

    /// Structured specification as JSON (repeatable)
    #[arg(short = 's', long = "spec")]
    pub specs: Vec<String>,

    /// File holding specifications (.json, or .toml with a `commands` key)
    #[arg(long)]
    pub spec_file: Option<PathBuf>,

    /// Only read files with this extension when walking directories
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Skip files and directories whose name matches this regex (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Network operating system for template parsing
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Extra template definitions (TOML)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Add a `raw` column with the text each row came from
    #[arg(long)]
    pub include_raw: bool,

    /// Add a `command` column with the section each row came from
    #[arg(long)]
    pub include_command: bool,

    /// Abort on the first per-file failure
    #[arg(long)]
    pub strict: bool,

    /// Process files one at a time
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the sections command.
#[derive(Debug, Parser)]
pub struct SectionsArgs {
    /// Files or directories to inspect
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Only read files with this extension when walking directories
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Skip files and directories whose name matches this regex (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
