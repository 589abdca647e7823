//! Pipeline error types.

use thiserror::Error;
use unify_ingest::IngestError;

/// Errors that stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No input files were supplied.
    #[error("no input files supplied")]
    NoInputFiles,

    /// A fixed worker pool must have at least one worker.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// An input file could not be dispatched or read.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: String },

    /// A worker panicked while merging, leaving the aggregate unusable.
    #[error("shared aggregate lock poisoned")]
    AggregatePoisoned,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
