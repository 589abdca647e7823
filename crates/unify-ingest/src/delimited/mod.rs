//! Delimited-text ingestion.

mod reader;

pub use reader::{CsvIngestor, read_csv_columns};
