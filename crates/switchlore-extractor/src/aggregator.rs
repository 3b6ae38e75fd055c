//! Result aggregation

use crate::executor::FileOutcome;
use crate::types::{QueryMetadata, QueryResult};

/// Collects per-file outcomes in any order and merges them file-major
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: Vec<(usize, FileOutcome)>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the outcome of the file at position `index` in the input
    pub fn push(&mut self, index: usize, outcome: FileOutcome) {
        self.outcomes.push((index, outcome));
    }

    /// Number of outcomes collected so far
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Merge into a result ordered by file index, then spec order
    pub fn finish(mut self, metadata: QueryMetadata) -> QueryResult {
        self.outcomes.sort_by_key(|(index, _)| *index);

        let mut result = QueryResult {
            metadata,
            ..QueryResult::default()
        };
        for (_, outcome) in self.outcomes {
            result.rows.extend(outcome.rows);
            result.failures.extend(outcome.failures);
        }
        result
    }
}
