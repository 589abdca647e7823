//! Input file ingestion for the statement unifier.
//!
//! Files are routed to an [`Ingestor`] by extension through an
//! [`IngestorRegistry`]. Each ingestor reads a whole file into a raw
//! [`unify_model::ColumnStore`]; schema normalization happens later.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use unify_ingest::IngestorRegistry;
//!
//! let registry = IngestorRegistry::with_defaults();
//! let ingestor = registry.resolve(Path::new("bank1.csv"))?;
//! let columns = ingestor.ingest(Path::new("bank1.csv"))?;
//! ```

mod delimited;
mod error;
mod registry;

// === Error Types ===
pub use error::{IngestError, Result};

// === Dispatch ===
pub use registry::{Ingestor, IngestorRegistry};

// === CSV Reading ===
pub use delimited::{CsvIngestor, read_csv_columns};
