//! Canonical column vocabulary shared by every normalized file.

use crate::ColumnStore;

/// Canonical column holding `DD-MM-YYYY` dates.
pub const DATE: &str = "date";

/// Canonical column holding the transaction type.
pub const TRANSACTION: &str = "transaction";

/// Canonical column holding the decimal amount.
pub const AMOUNT: &str = "amount";

/// Canonical columns in output order.
pub const CANONICAL_COLUMNS: [&str; 3] = [DATE, TRANSACTION, AMOUNT];

/// Returns true if `name` belongs to the canonical vocabulary.
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_COLUMNS.contains(&name)
}

/// Column order used when serializing a store.
///
/// Canonical columns come first in [`CANONICAL_COLUMNS`] order, followed by
/// every passthrough column in lexical order. The result depends only on the
/// set of column names, never on the order files were merged in.
pub fn canonical_column_order(store: &ColumnStore) -> Vec<&str> {
    let mut order: Vec<&str> = CANONICAL_COLUMNS
        .iter()
        .copied()
        .filter(|name| store.contains(name))
        .collect();
    order.extend(store.column_names().filter(|name| !is_canonical(name)));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_columns_lead_passthrough_columns() {
        let store: ColumnStore = [
            ("zeta", vec!["1"]),
            ("amount", vec!["1"]),
            ("account", vec!["1"]),
            ("date", vec!["1"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            canonical_column_order(&store),
            vec!["date", "amount", "account", "zeta"]
        );
    }

    #[test]
    fn empty_store_has_no_columns() {
        assert!(canonical_column_order(&ColumnStore::new()).is_empty());
    }
}
