//! Concurrent parse, normalize and merge pipeline.
//!
//! [`run_pipeline`] queues every input file, spawns a pool of worker threads
//! that drain the [`TaskQueue`], and folds each normalized file into one
//! [`SharedAggregate`]. Only the merge step is synchronized; ingestion and
//! normalization run fully in parallel.
//!
//! # Example
//!
//! ```ignore
//! use unify_core::{PipelineOptions, WorkerCount, run_pipeline};
//!
//! let options = PipelineOptions::default().with_workers(WorkerCount::Fixed(4));
//! let output = run_pipeline(&paths, &options)?;
//! println!("{} rows", output.aggregate.row_count());
//! ```

pub mod aggregate;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod queue;
pub mod summary;

pub use aggregate::SharedAggregate;
pub use error::{PipelineError, Result};
pub use options::{FailurePolicy, PipelineOptions, WorkerCount};
pub use pipeline::{PipelineOutput, build_queue, run_pipeline};
pub use queue::{FileRef, TaskQueue};
pub use summary::{FileReport, RunSummary, SkippedFile};
