//! Schema normalization for ingested column stores.
//!
//! Normalization runs in two steps, both pure with respect to the store:
//!
//! 1. [`SchemaNormalizer`] folds source column aliases into the canonical
//!    vocabulary (`date`, `transaction`, `amount`) with an ordered rule table.
//! 2. [`canonicalize_date_column`] rewrites the `date` column into
//!    `DD-MM-YYYY`, dropping values no accepted format can parse.
//!
//! # Example
//!
//! ```ignore
//! use unify_normalization::{SchemaNormalizer, normalize_file_columns};
//!
//! let (normalized, dates) = normalize_file_columns(&SchemaNormalizer::standard(), raw);
//! ```

pub mod dates;
pub mod rules;

use unify_model::ColumnStore;

pub use dates::{
    CANONICAL_DATE_FORMAT, DATE_INPUT_FORMATS, DateCanonicalization, canonicalize_date,
    canonicalize_date_column, canonicalize_dates, parse_date,
};
pub use rules::{
    CombineEuroCents, NormalizationRule, RenameColumn, RenameFirstPresent, SchemaNormalizer,
};

/// Apply the schema rules and then canonicalize dates.
pub fn normalize_file_columns(
    normalizer: &SchemaNormalizer,
    raw: ColumnStore,
) -> (ColumnStore, DateCanonicalization) {
    let mut normalized = normalizer.normalize(raw);
    let dates = canonicalize_date_column(&mut normalized);
    (normalized, dates)
}
