//! Column-oriented storage of string cells.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Mapping from column name to the ordered values of that column.
///
/// Columns are not required to share a length. Normalization may shorten a
/// single column (see date canonicalization), so readers should use
/// [`ColumnStore::row_count`] and treat missing cells as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnStore {
    columns: BTreeMap<String, Vec<String>>,
}

impl ColumnStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any existing column with the same name.
    ///
    /// Returns the values previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        self.columns.insert(name.into(), values)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.columns.remove(name)
    }

    /// Move the column `from` to `to`, overwriting any column already named `to`.
    ///
    /// Returns `false` when `from` is absent (the store is left unchanged).
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.columns.remove(from) {
            Some(values) => {
                self.columns.insert(to.to_string(), values);
                true
            }
            None => false,
        }
    }

    /// Column names in lexical order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells across all columns.
    pub fn value_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.columns.iter()
    }

    /// Fold another store into this one.
    ///
    /// Columns absent here are installed wholesale; columns present on both
    /// sides get `other`'s values appended after the existing ones.
    pub fn absorb(&mut self, other: ColumnStore) {
        for (name, values) in other.columns {
            match self.columns.entry(name) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(values);
                }
                btree_map::Entry::Occupied(mut slot) => {
                    slot.get_mut().extend(values);
                }
            }
        }
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.columns
    }
}

impl From<BTreeMap<String, Vec<String>>> for ColumnStore {
    fn from(columns: BTreeMap<String, Vec<String>>) -> Self {
        Self { columns }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ColumnStore
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let columns = iter
            .into_iter()
            .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
            .collect();
        Self { columns }
    }
}

impl IntoIterator for ColumnStore {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<'a> IntoIterator for &'a ColumnStore {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
