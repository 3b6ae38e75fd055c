//! Query engine

use crate::aggregator::ResultAggregator;
use crate::config::ExtractorConfig;
use crate::error::QueryError;
use crate::executor::{execute_file, ExecutionContext, FileOutcome, COMMAND_FIELD, RAW_FIELD};
use crate::ingest::{ingest_files, load_files, IngestOptions};
use crate::normalizer::normalize;
use crate::registry::ActionRegistry;
use crate::types::{ActionKind, CommandSpec, QueryInput, QueryMetadata, QueryResult};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use switchlore_domain::{ConfigFile, TemplateParser, SOURCE_FILE_FIELD};
use tracing::{debug, info};

/// Runs queries over configuration files
///
/// The engine owns a shared, read-only action registry and template parser.
/// Register custom actions on an [`ActionRegistry`] first, then hand it to
/// [`QueryEngine::with_registry`].
#[derive(Clone)]
pub struct QueryEngine {
    registry: Arc<ActionRegistry>,
    templates: Arc<dyn TemplateParser>,
    config: ExtractorConfig,
}

impl QueryEngine {
    /// Create an engine with the built-in actions
    pub fn new<T>(templates: T, config: ExtractorConfig) -> Result<Self, QueryError>
    where
        T: TemplateParser + 'static,
    {
        Self::with_registry(
            Arc::new(templates),
            Arc::new(ActionRegistry::with_builtins()),
            config,
        )
    }

    /// Create an engine with a caller-built registry
    pub fn with_registry(
        templates: Arc<dyn TemplateParser>,
        registry: Arc<ActionRegistry>,
        config: ExtractorConfig,
    ) -> Result<Self, QueryError> {
        config.validate().map_err(QueryError::Config)?;
        Ok(Self {
            registry,
            templates,
            config,
        })
    }

    /// The action registry
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The engine configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Normalize query input against this engine's registry
    pub fn normalize(&self, input: impl Into<QueryInput>) -> Result<Vec<CommandSpec>, QueryError> {
        normalize(input, &self.registry)
    }

    /// Run a query over in-memory files
    pub fn query(
        &self,
        files: &[ConfigFile],
        input: impl Into<QueryInput>,
    ) -> Result<QueryResult, QueryError> {
        let specs = self.normalize(input)?;
        self.query_specs(files, &specs)
    }

    /// Expand and read `sources`, then run a query over them
    ///
    /// The input is normalized before any file is touched.
    pub fn query_paths<P: AsRef<Path>>(
        &self,
        sources: &[P],
        ingest: &IngestOptions,
        input: impl Into<QueryInput>,
    ) -> Result<QueryResult, QueryError> {
        let specs = self.normalize(input)?;
        let paths = ingest_files(sources, ingest)?;
        let files = load_files(&paths)?;
        self.query_specs(&files, &specs)
    }

    /// Run already-normalized specifications over files
    ///
    /// Specs normalized against a different registry are accepted only if
    /// every custom action they name is registered here as well.
    pub fn query_specs(
        &self,
        files: &[ConfigFile],
        specs: &[CommandSpec],
    ) -> Result<QueryResult, QueryError> {
        let unregistered = specs.iter().find_map(|spec| match &spec.action {
            ActionKind::Custom { name, .. } if !self.registry.contains(name) => Some(name),
            _ => None,
        });
        if let Some(name) = unregistered {
            return Err(QueryError::UnregisteredAction(name.clone()));
        }

        let start_time = SystemTime::now();
        info!(
            "Starting query: {} file(s), {} command(s), platform '{}'",
            files.len(),
            specs.len(),
            self.config.platform
        );

        let ctx = ExecutionContext {
            templates: self.templates.as_ref(),
            config: &self.config,
        };

        let mut aggregator = ResultAggregator::new();
        if self.config.parallel {
            let outcomes: Vec<(usize, FileOutcome)> = files
                .par_iter()
                .enumerate()
                .map(|(index, file)| (index, execute_file(file, specs, &ctx)))
                .collect();
            for (index, outcome) in outcomes {
                aggregator.push(index, outcome);
            }
        } else {
            for (index, file) in files.iter().enumerate() {
                let outcome = execute_file(file, specs, &ctx);
                if self.config.strict {
                    if let Some(failure) = outcome.failures.first() {
                        return Err(QueryError::Strict(failure.clone()));
                    }
                }
                aggregator.push(index, outcome);
            }
        }

        let processing_time_ms = start_time
            .elapsed()
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        let result = aggregator.finish(QueryMetadata {
            files_processed: files.len(),
            specs: specs.len(),
            processing_time_ms,
            base_columns: self.base_columns(),
        });

        if self.config.strict {
            if let Some(failure) = result.failures.first() {
                return Err(QueryError::Strict(failure.clone()));
            }
        }

        for failure in &result.failures {
            debug!("{}", failure);
        }
        info!(
            "Query complete: {} row(s), {} failure(s) in {} ms",
            result.rows.len(),
            result.failures.len(),
            processing_time_ms
        );

        Ok(result)
    }

    fn base_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        if self.config.include_command {
            columns.push(COMMAND_FIELD.to_string());
        }
        if self.config.include_raw {
            columns.push(RAW_FIELD.to_string());
        }
        columns.push(SOURCE_FILE_FIELD.to_string());
        columns
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
