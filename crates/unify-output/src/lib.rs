//! Unified file generation.
//!
//! The aggregate is written once, after every worker has finished, as a
//! single delimited table. Writes go through a temp file and a rename so a
//! failed run never leaves a half-written output behind.

mod csv_writer;
mod error;

pub use csv_writer::{
    DEFAULT_OUTPUT_FILE, WriteOptions, WrittenTable, render_unified_csv, write_table,
    write_unified_csv,
};
pub use error::{OutputError, Result};
