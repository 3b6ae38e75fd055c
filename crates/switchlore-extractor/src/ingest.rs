//! File ingestion
//!
//! Expands files and directories into the list of configuration files a
//! query runs over.

use crate::error::QueryError;
use regex::Regex;
use std::path::{Path, PathBuf};
use switchlore_domain::ConfigFile;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Filters applied while expanding sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Keep only files whose name ends with this suffix
    pub extension: Option<String>,

    /// Skip files and directories whose name matches any of these regexes
    pub exclude: Vec<String>,
}

impl IngestOptions {
    /// Only keep files ending with `extension`
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Skip names matching `pattern`
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }
}

struct Filters {
    extension: Option<String>,
    exclude: Vec<Regex>,
}

impl Filters {
    fn compile(options: &IngestOptions) -> Result<Self, QueryError> {
        let exclude = options
            .exclude
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| QueryError::Ingest(format!("invalid exclude pattern '{}': {}", pattern, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            extension: options.extension.clone().filter(|e| !e.is_empty()),
            exclude,
        })
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(name))
    }

    fn accepts_file(&self, name: &str) -> bool {
        if self.is_excluded(name) {
            return false;
        }
        match &self.extension {
            Some(extension) => name.ends_with(extension.as_str()),
            None => true,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand `sources` into absolute file paths
///
/// Directories are walked recursively, entries sorted by file name. Excluded
/// directories are not descended into. A source that does not exist is an
/// error; unreadable entries inside a directory are skipped with a warning.
pub fn ingest_files<P: AsRef<Path>>(
    sources: &[P],
    options: &IngestOptions,
) -> Result<Vec<PathBuf>, QueryError> {
    let filters = Filters::compile(options)?;
    let mut matched = Vec::new();

    for source in sources {
        let source = source.as_ref();
        if !source.exists() {
            return Err(QueryError::Ingest(format!("'{}' does not exist", source.display())));
        }

        if source.is_dir() {
            let walker = WalkDir::new(source)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry: &DirEntry| {
                    entry.depth() == 0 || !filters.is_excluded(&entry.file_name().to_string_lossy())
                });

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry under {}: {}", source.display(), e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                if filters.accepts_file(&entry.file_name().to_string_lossy()) {
                    matched.push(absolute(entry.path())?);
                }
            }
        } else if source.is_file() {
            if filters.accepts_file(&file_name(source)) {
                matched.push(absolute(source)?);
            }
        } else {
            return Err(QueryError::Ingest(format!(
                "'{}' is neither a regular file nor a directory",
                source.display()
            )));
        }
    }

    debug!("Ingested {} file(s) from {} source(s)", matched.len(), sources.len());
    Ok(matched)
}

fn absolute(path: &Path) -> Result<PathBuf, QueryError> {
    path.canonicalize().map_err(|source| QueryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read files as UTF-8, identified by their path
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ConfigFile>, QueryError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path).map_err(|source| QueryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(ConfigFile::new(path.display().to_string(), content))
        })
        .collect()
}
