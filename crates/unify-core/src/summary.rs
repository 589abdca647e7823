//! Per-run bookkeeping reported back to the caller.

use std::path::PathBuf;

use serde::Serialize;

/// One file that was merged into the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Name of the worker thread that processed the file.
    pub worker: String,
    /// Longest column after normalization.
    pub rows: usize,
    pub columns: usize,
    /// `date` values dropped because no accepted format matched.
    pub dates_dropped: usize,
}

/// One file left out of the aggregate under [`crate::FailurePolicy::SkipFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened during a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of worker threads spawned.
    pub workers: usize,
    /// Merged files, sorted by path.
    pub files: Vec<FileReport>,
    /// Skipped files, sorted by path.
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    pub fn dates_dropped(&self) -> usize {
        self.files.iter().map(|file| file.dates_dropped).sum()
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
