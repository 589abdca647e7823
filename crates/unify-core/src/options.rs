//! Pipeline configuration.

use unify_ingest::IngestorRegistry;
use unify_normalization::SchemaNormalizer;

use crate::error::{PipelineError, Result};

/// How many worker threads drain the task queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkerCount {
    /// One worker per queued file.
    #[default]
    PerFile,
    /// A fixed pool, capped at the number of queued files.
    Fixed(usize),
}

impl WorkerCount {
    /// Number of threads to spawn for `files` queued files.
    pub fn resolve(self, files: usize) -> Result<usize> {
        match self {
            WorkerCount::PerFile => Ok(files),
            WorkerCount::Fixed(0) => Err(PipelineError::InvalidWorkerCount),
            WorkerCount::Fixed(n) => Ok(n.min(files)),
        }
    }
}

/// What to do when a single file cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole run; no output is produced.
    #[default]
    Abort,
    /// Leave the file out of the aggregate and log a warning.
    SkipFile,
}

/// Options controlling a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Ingestors available for dispatch by extension.
    pub registry: IngestorRegistry,
    /// Rule table applied to every file.
    pub normalizer: SchemaNormalizer,
    /// Worker pool sizing.
    pub workers: WorkerCount,
    /// Per-file failure handling.
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            registry: IngestorRegistry::with_defaults(),
            normalizer: SchemaNormalizer::standard(),
            workers: WorkerCount::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_registry(mut self, registry: IngestorRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: SchemaNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: WorkerCount) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_spawns_one_worker_per_file() {
        assert_eq!(WorkerCount::PerFile.resolve(5).unwrap(), 5);
    }

    #[test]
    fn fixed_pool_is_capped_by_file_count() {
        assert_eq!(WorkerCount::Fixed(8).resolve(3).unwrap(), 3);
        assert_eq!(WorkerCount::Fixed(2).resolve(10).unwrap(), 2);
    }

    #[test]
    fn fixed_pool_of_zero_is_rejected() {
        assert!(matches!(
            WorkerCount::Fixed(0).resolve(3),
            Err(PipelineError::InvalidWorkerCount)
        ));
    }

    #[test]
    fn defaults_abort_with_per_file_workers() {
        let options = PipelineOptions::default();
        assert_eq!(options.workers, WorkerCount::PerFile);
        assert_eq!(options.failure_policy, FailurePolicy::Abort);
        assert_eq!(options.registry.extensions().collect::<Vec<_>>(), vec!["csv"]);
    }
}
