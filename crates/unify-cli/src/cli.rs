//! CLI argument definitions for the statement unifier.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use unify_output::DEFAULT_OUTPUT_FILE;

#[derive(Parser)]
#[command(
    name = "statement-unifier",
    version,
    about = "Merge bank statement exports into one unified CSV",
    long_about = "Merge bank statement exports into one unified CSV.\n\n\
                  Each input is parsed on its own worker thread, its columns are\n\
                  normalized to date/transaction/amount, and all files are\n\
                  written as a single table."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: UnifyArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct UnifyArgs {
    /// Comma-separated list of input files to merge. Empty entries are ignored.
    #[arg(long = "filepath", value_name = "PATHS", value_delimiter = ',')]
    pub filepath: Vec<String>,

    /// Path of the unified output file.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Use a fixed pool of worker threads instead of one per file.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// Leave unreadable files out with a warning instead of failing the run.
    #[arg(long = "skip-failed")]
    pub skip_failed: bool,

    /// Field delimiter of the input files.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Write a JSON run report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
