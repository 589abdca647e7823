//! Data model for the statement unifier.
//!
//! A [`ColumnStore`] is both the per-file result of ingestion and the shared
//! aggregate every file is merged into. The [`columns`] module names the
//! canonical vocabulary that normalization folds source columns into.

pub mod column_store;
pub mod columns;

pub use column_store::ColumnStore;
pub use columns::{AMOUNT, CANONICAL_COLUMNS, DATE, TRANSACTION, canonical_column_order};
