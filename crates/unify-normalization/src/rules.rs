//! Ordered rewrite rules folding source column aliases into canonical names.
//!
//! The rule table consists of:
//! - `NormalizationRule` - Trait for a single pure rewrite of a column store
//! - `SchemaNormalizer` - Applies a fixed list of rules in order
//!
//! Later rules see the store as rewritten by earlier ones, so the order of
//! [`SchemaNormalizer::standard`] is part of its contract.

use std::fmt;
use std::sync::Arc;

use unify_model::{AMOUNT, ColumnStore, DATE, TRANSACTION};

/// Source column holding whole euros.
pub const EURO: &str = "euro";
/// Source column holding cents.
pub const CENTS: &str = "cents";
/// Source column holding a machine timestamp.
pub const TIMESTAMP: &str = "timestamp";
/// Source column holding a human-readable date.
pub const DATE_READABLE: &str = "date_readable";
/// Source column holding the transaction type.
pub const TYPE: &str = "type";
/// Source column holding the amount.
pub const AMOUNTS: &str = "amounts";

/// A single pure rewrite applied to a raw column store.
pub trait NormalizationRule: Send + Sync {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;

    /// Rewrite the store. Rules that do not match return it unchanged.
    fn apply(&self, store: ColumnStore) -> ColumnStore;
}

/// Combines `euro` and `cents` into `amount` as `"{euro}.{cents}"`.
///
/// Values are paired by position; the result has the length of the shorter
/// input column.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineEuroCents;

impl NormalizationRule for CombineEuroCents {
    fn id(&self) -> &'static str {
        "combine-euro-cents"
    }

    fn apply(&self, mut store: ColumnStore) -> ColumnStore {
        if !(store.contains(EURO) && store.contains(CENTS)) {
            return store;
        }
        let euro = store.remove(EURO).unwrap_or_default();
        let cents = store.remove(CENTS).unwrap_or_default();
        let amount = euro
            .iter()
            .zip(&cents)
            .map(|(euro, cents)| format!("{euro}.{cents}"))
            .collect();
        store.insert(AMOUNT, amount);
        store
    }
}

/// Renames `from` to `to`, overwriting an existing `to` column.
#[derive(Debug, Clone, Copy)]
pub struct RenameColumn {
    id: &'static str,
    from: &'static str,
    to: &'static str,
}

impl RenameColumn {
    pub const fn new(id: &'static str, from: &'static str, to: &'static str) -> Self {
        Self { id, from, to }
    }
}

impl NormalizationRule for RenameColumn {
    fn id(&self) -> &'static str {
        self.id
    }

    fn apply(&self, mut store: ColumnStore) -> ColumnStore {
        store.rename(self.from, self.to);
        store
    }
}

/// Renames the first present column of `candidates` to `to`.
///
/// Lower-priority candidates are discarded once one matched, so the target
/// column never carries values from two aliases and reapplying the rule is a
/// no-op.
#[derive(Debug, Clone, Copy)]
pub struct RenameFirstPresent {
    id: &'static str,
    candidates: &'static [&'static str],
    to: &'static str,
}

impl RenameFirstPresent {
    pub const fn new(
        id: &'static str,
        candidates: &'static [&'static str],
        to: &'static str,
    ) -> Self {
        Self { id, candidates, to }
    }
}

impl NormalizationRule for RenameFirstPresent {
    fn id(&self) -> &'static str {
        self.id
    }

    fn apply(&self, mut store: ColumnStore) -> ColumnStore {
        let Some(position) = self
            .candidates
            .iter()
            .position(|name| store.contains(name))
        else {
            return store;
        };
        store.rename(self.candidates[position], self.to);
        for shadowed in &self.candidates[position + 1..] {
            store.remove(shadowed);
        }
        store
    }
}

/// Applies an ordered list of rules, each at most once.
#[derive(Clone)]
pub struct SchemaNormalizer {
    rules: Vec<Arc<dyn NormalizationRule>>,
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::standard()
    }
}

impl SchemaNormalizer {
    /// Normalizer without rules; returns stores unchanged.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The bank statement rule table:
    ///
    /// 1. `euro` + `cents` -> `amount`
    /// 2. `timestamp` -> `date`, else `date_readable` -> `date`
    /// 3. `type` -> `transaction`
    /// 4. `amounts` -> `amount`
    pub fn standard() -> Self {
        let mut normalizer = Self::empty();
        normalizer.add_rule(Arc::new(CombineEuroCents));
        normalizer.add_rule(Arc::new(RenameFirstPresent::new(
            "rename-date",
            &[TIMESTAMP, DATE_READABLE],
            DATE,
        )));
        normalizer.add_rule(Arc::new(RenameColumn::new(
            "rename-type",
            TYPE,
            TRANSACTION,
        )));
        normalizer.add_rule(Arc::new(RenameColumn::new(
            "rename-amounts",
            AMOUNTS,
            AMOUNT,
        )));
        normalizer
    }

    /// Append a rule to the end of the table.
    pub fn add_rule(&mut self, rule: Arc<dyn NormalizationRule>) {
        self.rules.push(rule);
    }

    /// Rule identifiers in application order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    pub fn normalize(&self, store: ColumnStore) -> ColumnStore {
        self.rules.iter().fold(store, |store, rule| {
            let next = rule.apply(store);
            tracing::trace!(rule = rule.id(), columns = next.width(), "applied rule");
            next
        })
    }
}

impl fmt::Debug for SchemaNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNormalizer")
            .field("rules", &self.rule_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(columns: &[(&str, &[&str])]) -> ColumnStore {
        columns
            .iter()
            .map(|(name, values)| (*name, values.iter().copied()))
            .collect()
    }

    fn values(store: &ColumnStore, name: &str) -> Vec<String> {
        store.get(name).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn euro_and_cents_become_amount() {
        let result = CombineEuroCents.apply(store(&[
            ("euro", &["10", "5"]),
            ("cents", &["50", "00"]),
        ]));
        assert_eq!(values(&result, "amount"), vec!["10.50", "5.00"]);
        assert!(!result.contains("euro"));
        assert!(!result.contains("cents"));
    }

    #[test]
    fn euro_and_cents_pair_to_shorter_column() {
        let result = CombineEuroCents.apply(store(&[
            ("euro", &["1", "2", "3"]),
            ("cents", &["10"]),
        ]));
        assert_eq!(values(&result, "amount"), vec!["1.10"]);
    }

    #[test]
    fn euro_alone_is_left_untouched() {
        let result = CombineEuroCents.apply(store(&[("euro", &["10"])]));
        assert_eq!(values(&result, "euro"), vec!["10"]);
        assert!(!result.contains("amount"));
    }

    #[test]
    fn timestamp_wins_over_date_readable() {
        let result = SchemaNormalizer::standard().normalize(store(&[
            ("timestamp", &["Jan 05 2020"]),
            ("date_readable", &["06 Jan 2020"]),
        ]));
        assert_eq!(values(&result, "date"), vec!["Jan 05 2020"]);
        assert!(!result.contains("timestamp"));
        assert!(!result.contains("date_readable"));
    }

    #[test]
    fn date_readable_used_without_timestamp() {
        let result =
            SchemaNormalizer::standard().normalize(store(&[("date_readable", &["05 Jan 2020"])]));
        assert_eq!(values(&result, "date"), vec!["05 Jan 2020"]);
    }

    #[test]
    fn timestamp_overwrites_existing_date() {
        let result = SchemaNormalizer::standard().normalize(store(&[
            ("timestamp", &["Jan 05 2020"]),
            ("date", &["stale"]),
        ]));
        assert_eq!(values(&result, "date"), vec!["Jan 05 2020"]);
    }

    #[test]
    fn amounts_overrides_combined_euro_cents() {
        let result = SchemaNormalizer::standard().normalize(store(&[
            ("euro", &["1"]),
            ("cents", &["00"]),
            ("amounts", &["9.99"]),
        ]));
        assert_eq!(values(&result, "amount"), vec!["9.99"]);
    }

    #[test]
    fn type_becomes_transaction_and_passthrough_survives() {
        let result = SchemaNormalizer::standard().normalize(store(&[
            ("type", &["add"]),
            ("to", &["198"]),
        ]));
        let names: Vec<&str> = result.column_names().collect();
        assert_eq!(names, vec!["to", "transaction"]);
    }

    #[test]
    fn standard_rule_order() {
        assert_eq!(
            SchemaNormalizer::standard().rule_ids(),
            vec![
                "combine-euro-cents",
                "rename-date",
                "rename-type",
                "rename-amounts"
            ]
        );
    }
}
