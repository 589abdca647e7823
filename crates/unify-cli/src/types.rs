use std::path::PathBuf;

use unify_core::RunSummary;
use unify_output::WrittenTable;

#[derive(Debug)]
pub struct UnifyResult {
    pub output_path: PathBuf,
    pub written: WrittenTable,
    pub summary: RunSummary,
    pub report_path: Option<PathBuf>,
}
