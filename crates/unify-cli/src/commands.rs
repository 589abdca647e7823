use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use unify_core::{FailurePolicy, PipelineOptions, WorkerCount, run_pipeline};
use unify_ingest::{CsvIngestor, IngestorRegistry};
use unify_output::{WriteOptions, write_unified_csv};

use crate::cli::UnifyArgs;
use crate::report::{RunReport, write_report};
use crate::types::UnifyResult;

pub fn run_unify(args: &UnifyArgs) -> Result<UnifyResult> {
    let span = info_span!("unify", output = %args.output.display());
    let _guard = span.enter();

    let paths = input_paths(&args.filepath)?;
    let options = pipeline_options(args)?;
    info!(files = paths.len(), "started execution");

    let output = run_pipeline(&paths, &options).context("process input files")?;
    let written = write_unified_csv(&args.output, &output.aggregate, &WriteOptions::default())
        .context("write unified file")?;

    let mut result = UnifyResult {
        output_path: args.output.clone(),
        written,
        summary: output.summary,
        report_path: None,
    };
    if let Some(path) = &args.report {
        result.report_path = Some(write_report(path, &RunReport::from_result(&result))?);
    }
    info!(
        rows = result.written.rows,
        columns = result.written.columns,
        "completed execution"
    );
    Ok(result)
}

/// Drop empty entries left by stray commas; an empty result is a usage error.
pub fn input_paths(raw: &[String]) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = raw
        .iter()
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect();
    if paths.is_empty() {
        bail!("please provide the files to parse with --filepath");
    }
    Ok(paths)
}

pub fn pipeline_options(args: &UnifyArgs) -> Result<PipelineOptions> {
    let delimiter = match u8::try_from(args.delimiter) {
        Ok(byte) if byte.is_ascii() => byte,
        _ => bail!("delimiter must be a single ASCII character, got {:?}", args.delimiter),
    };
    let mut registry = IngestorRegistry::with_defaults();
    registry.register(Arc::new(CsvIngestor::default().with_delimiter(delimiter)));

    let workers = match args.workers {
        Some(count) => WorkerCount::Fixed(count.get()),
        None => WorkerCount::PerFile,
    };
    let failure_policy = if args.skip_failed {
        FailurePolicy::SkipFile
    } else {
        FailurePolicy::Abort
    };
    Ok(PipelineOptions::default()
        .with_registry(registry)
        .with_workers(workers)
        .with_failure_policy(failure_policy))
}
