//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use switchlore_extractor::{ExtractionFailure, QueryResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Section names found in one file
pub type SectionListing = (String, Vec<String>);

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format query rows.
    pub fn format_result(&self, result: &QueryResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(self.format_result_quiet(result)),
        }
    }

    /// Render rows as a column-unified table; missing fields are blank.
    fn format_result_table(&self, result: &QueryResult) -> String {
        let table = result.to_table();

        let mut builder = Builder::default();
        builder.push_record(table.columns.iter().map(String::as_str));
        for row in &table.rows {
            builder.push_record(row.iter().map(|cell| cell.as_deref().unwrap_or_default()));
        }

        let mut rendered = builder.build();
        rendered
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = rendered.to_string();
        if result.is_empty() {
            output.push('\n');
            output.push_str(&self.colorize("No rows extracted.", "yellow"));
        }
        output
    }

    /// One `<count>\t<source_file>` line per file that produced rows.
    fn format_result_quiet(&self, result: &QueryResult) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for row in &result.rows {
            if let Some((source, count)) = counts.last_mut() {
                if *source == row.source_file() {
                    *count += 1;
                    continue;
                }
            }
            counts.push((row.source_file(), 1));
        }
        counts
            .iter()
            .map(|(source, count)| format!("{}\t{}", count, source))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format per-file failures, one per line.
    pub fn format_failures(&self, failures: &[ExtractionFailure]) -> String {
        failures
            .iter()
            .map(|failure| self.warning(&failure.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Summary line for a finished query.
    pub fn query_summary(&self, result: &QueryResult) -> String {
        let message = format!(
            "{} row(s) from {} file(s) in {} ms",
            result.rows.len(),
            result.metadata.files_processed,
            result.metadata.processing_time_ms
        );
        if result.has_failures() {
            self.warning(&format!("{}, {} failure(s)", message, result.failures.len()))
        } else {
            self.success(&message)
        }
    }

    /// Format the sections found in each file.
    pub fn format_sections(&self, listings: &[SectionListing]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = listings
                    .iter()
                    .map(|(source, sections)| {
                        serde_json::json!({
                            "source_file": source,
                            "sections": sections,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if listings.is_empty() {
                    return Ok(self.colorize("No files found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Source File", "Section"]);
                for (source, sections) in listings {
                    for section in sections {
                        builder.push_record([source.as_str(), section.as_str()]);
                    }
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(listings
                .iter()
                .map(|(source, sections)| format!("{}\t{}", sections.len(), source))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format registered action names.
    pub fn format_actions(&self, names: &[&str], template_action: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "template": template_action,
                "actions": names,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Action", "Kind"]);
                builder.push_record([template_action, "template"]);
                for name in names {
                    builder.push_record([*name, "registered"]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(names.join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether status lines should be printed alongside the data.
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
