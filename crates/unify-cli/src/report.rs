//! Machine-readable run report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use unify_core::{FileReport, SkippedFile};

use crate::types::UnifyResult;

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub output: &'a Path,
    pub columns: usize,
    pub rows: usize,
    pub workers: usize,
    pub files: &'a [FileReport],
    pub skipped: &'a [SkippedFile],
}

impl<'a> RunReport<'a> {
    pub fn from_result(result: &'a UnifyResult) -> Self {
        Self {
            output: &result.output_path,
            columns: result.written.columns,
            rows: result.written.rows,
            workers: result.summary.workers,
            files: &result.summary.files,
            skipped: &result.summary.skipped,
        }
    }
}

pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(path.to_path_buf())
}
