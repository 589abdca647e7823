//! Queue, worker pool and merge orchestration.
//!
//! Every input path is dispatched to an ingestor before any thread starts, so
//! an unsupported file kind fails the run without partial work. Workers then
//! drain the queue, each processing one file end-to-end (ingest, normalize,
//! canonicalize dates, merge) before polling again. The caller only sees the
//! aggregate after every worker has been joined.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};
use unify_model::ColumnStore;
use unify_normalization::{SchemaNormalizer, normalize_file_columns};

use crate::aggregate::SharedAggregate;
use crate::error::{PipelineError, Result};
use crate::options::{FailurePolicy, PipelineOptions};
use crate::queue::{FileRef, TaskQueue};
use crate::summary::{FileReport, RunSummary, SkippedFile};

/// The merged aggregate and the bookkeeping of how it was built.
#[derive(Debug)]
pub struct PipelineOutput {
    pub aggregate: ColumnStore,
    pub summary: RunSummary,
}

#[derive(Debug, Default)]
struct WorkerReport {
    processed: Vec<FileReport>,
    skipped: Vec<SkippedFile>,
}

/// Shared, read-only state handed to every worker.
struct WorkerContext<'a> {
    queue: &'a TaskQueue,
    aggregate: &'a SharedAggregate,
    normalizer: &'a SchemaNormalizer,
    policy: FailurePolicy,
    abort: &'a AtomicBool,
    /// Earliest failure recorded by any worker; later ones are discarded.
    failure: &'a OnceLock<PipelineError>,
}

/// Resolve an ingestor for every path and queue the files.
pub fn build_queue(paths: &[PathBuf], options: &PipelineOptions) -> Result<TaskQueue> {
    if paths.is_empty() {
        return Err(PipelineError::NoInputFiles);
    }
    let queue = TaskQueue::new();
    for path in paths {
        let ingestor = options.registry.resolve(path)?;
        queue.enqueue(FileRef::new(path.clone(), ingestor));
    }
    debug!(files = queue.len(), "files have been added to queue");
    Ok(queue)
}

/// Ingest, normalize and merge every file in `paths`.
///
/// # Errors
///
/// Fails before spawning workers on an empty input list, an invalid worker
/// count, or an unsupported file kind. Under [`FailurePolicy::Abort`] the
/// earliest failure across all workers is returned once every worker joined.
pub fn run_pipeline(paths: &[PathBuf], options: &PipelineOptions) -> Result<PipelineOutput> {
    let queue = build_queue(paths, options)?;
    let worker_count = options.workers.resolve(queue.len())?;
    let aggregate = SharedAggregate::new();
    let abort = AtomicBool::new(false);
    let failure = OnceLock::new();
    let context = WorkerContext {
        queue: &queue,
        aggregate: &aggregate,
        normalizer: &options.normalizer,
        policy: options.failure_policy,
        abort: &abort,
        failure: &failure,
    };

    let start = Instant::now();
    info!(files = queue.len(), workers = worker_count, "starting workers");
    let (reports, pool_error) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(worker_count);
        let mut pool_error = None;
        for idx in 0..worker_count {
            let name = format!("worker-{idx}");
            let context = &context;
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(scope, move || run_worker(context));
            match spawned {
                Ok(handle) => handles.push((name, handle)),
                Err(source) => {
                    abort.store(true, Ordering::SeqCst);
                    pool_error = Some(PipelineError::WorkerSpawn { source });
                    break;
                }
            }
        }

        // Join every worker before looking at any result.
        let mut reports = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    warn!(worker = %name, "worker panicked");
                    if pool_error.is_none() {
                        pool_error = Some(PipelineError::WorkerPanicked { worker: name });
                    }
                }
            }
        }
        (reports, pool_error)
    });

    if let Some(error) = pool_error {
        return Err(error);
    }
    if let Some(error) = failure.into_inner() {
        return Err(error);
    }

    let mut summary = RunSummary {
        workers: worker_count,
        ..RunSummary::default()
    };
    for report in reports {
        summary.files.extend(report.processed);
        summary.skipped.extend(report.skipped);
    }
    summary.files.sort_by(|a, b| a.path.cmp(&b.path));
    summary.skipped.sort_by(|a, b| a.path.cmp(&b.path));

    let aggregate = aggregate.into_inner()?;
    info!(
        files = summary.files.len(),
        skipped = summary.skipped.len(),
        columns = aggregate.width(),
        rows = aggregate.row_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "all workers finished"
    );
    Ok(PipelineOutput { aggregate, summary })
}

fn run_worker(context: &WorkerContext<'_>) -> WorkerReport {
    let worker = thread::current()
        .name()
        .unwrap_or("worker")
        .to_string();
    let span = info_span!("worker", worker = %worker);
    let _guard = span.enter();
    let mut report = WorkerReport::default();

    while !context.abort.load(Ordering::SeqCst) {
        let Some(file) = context.queue.dequeue() else {
            break;
        };
        match process_file(&file, context, &worker) {
            Ok(processed) => report.processed.push(processed),
            Err(PipelineError::Ingest(error)) if context.policy == FailurePolicy::SkipFile => {
                warn!(path = %file.path().display(), %error, "skipping file");
                report.skipped.push(SkippedFile {
                    path: file.path().to_path_buf(),
                    reason: error.to_string(),
                });
            }
            Err(error) => {
                warn!(path = %file.path().display(), %error, "aborting run");
                let _ = context.failure.set(error);
                context.abort.store(true, Ordering::SeqCst);
                break;
            }
        }
    }
    report
}

fn process_file(file: &FileRef, context: &WorkerContext<'_>, worker: &str) -> Result<FileReport> {
    let path = file.path();
    debug!(path = %path.display(), kind = file.ingestor().kind(), "processing file");

    let raw = file.ingestor().ingest(path)?;
    let (normalized, dates) = normalize_file_columns(context.normalizer, raw);
    if dates.dropped > 0 {
        debug!(
            path = %path.display(),
            dropped = dates.dropped,
            kept = dates.kept,
            "dropped unparseable dates"
        );
    }

    let processed = FileReport {
        path: path.to_path_buf(),
        worker: worker.to_string(),
        rows: normalized.row_count(),
        columns: normalized.width(),
        dates_dropped: dates.dropped,
    };
    context.aggregate.merge(normalized)?;
    debug!(
        path = %path.display(),
        rows = processed.rows,
        columns = processed.columns,
        "finished processing file"
    );
    Ok(processed)
}
