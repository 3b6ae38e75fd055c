//! SwitchLore Extractor
//!
//! Turns sections of network-switch configuration files into tabular records.
//!
//! # Overview
//!
//! A query is a list of command specifications. Each one is either a plain
//! command name, parsed by the template layer, or a structured request naming
//! a custom action such as block capture. The engine normalizes the list once,
//! runs every request against every file, stamps each record with its
//! `source_file`, and returns the rows in file-major order together with any
//! per-file failures.
//!
//! # Architecture
//!
//! ```text
//! input → normalize → [file × spec] → template adapter | action registry
//!                                   → rows + failures → aggregator → Table
//! ```
//!
//! # Key Features
//!
//! - **Request normalization**: strings and structured specs, validated up front
//! - **Action registry**: built-in block capture, open to caller registrations
//! - **Block segmentation**: interface stanzas and similar named blocks
//! - **Provenance**: every row carries the file it came from
//! - **Parallel fan-out**: files are processed concurrently, results stay ordered
//!
//! # Example Usage
//!
//! ```
//! use switchlore_domain::{ActionOptions, ConfigFile};
//! use switchlore_extractor::{ExtractorConfig, QueryEngine, StructuredSpec};
//! use switchlore_templates::MockTemplates;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = QueryEngine::new(MockTemplates::new(), ExtractorConfig::default())?;
//!
//! let files = vec![ConfigFile::new(
//!     "sw1.cfg",
//!     "interface Gi0/1\n description uplink\nexit\n",
//! )];
//! let spec = StructuredSpec::new("interface")
//!     .with_action("capture_block_config")
//!     .with_options(ActionOptions::new().with("terminators", vec!["exit"]));
//!
//! let result = engine.query(&files, spec)?;
//!
//! assert_eq!(result.rows.len(), 1);
//! assert_eq!(result.rows[0].get("interface"), Some("Gi0/1"));
//! assert_eq!(result.rows[0].source_file(), "sw1.cfg");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod actions;
mod adapter;
mod aggregator;
mod attributes;
mod config;
mod engine;
mod error;
mod executor;
mod ingest;
mod normalizer;
mod registry;
mod sections;
mod segment;
mod types;


pub use actions::{BlockCaptureAction, FnAction};
pub use aggregator::ResultAggregator;
pub use attributes::parse_attributes;
pub use config::ExtractorConfig;
pub use engine::QueryEngine;
pub use error::QueryError;
pub use executor::{execute_file, ExecutionContext, FileOutcome};
pub use ingest::{ingest_files, load_files, IngestOptions};
pub use normalizer::normalize;
pub use registry::{
    ActionRegistry, RegistryError, CAPTURE_BLOCK_CONFIG, CAPTURE_INTERFACES,
    CAPTURE_INTERFACE_CONFIG, TEMPLATE_ACTION,
};
pub use sections::{default_section_header, split_sections, split_sections_with};
pub use segment::{segment_blocks, Block, BlockRules, BlockStart};
pub use types::{
    ActionKind, CommandInput, CommandSpec, ExtractionFailure, FailureKind, QueryInput,
    QueryMetadata, QueryResult, StructuredSpec,
};
