//! The shared aggregate every worker merges into.

use std::sync::Mutex;

use unify_model::ColumnStore;

use crate::error::{PipelineError, Result};

/// A [`ColumnStore`] behind a mutex.
///
/// [`SharedAggregate::merge`] is the only point where workers touch shared
/// data; the lock is held for the append and nothing else.
#[derive(Debug, Default)]
pub struct SharedAggregate {
    inner: Mutex<ColumnStore>,
}

impl SharedAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a normalized per-file store after everything merged so far.
    pub fn merge(&self, store: ColumnStore) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| PipelineError::AggregatePoisoned)?;
        guard.absorb(store);
        Ok(())
    }

    /// Consume the aggregate once every worker has finished.
    pub fn into_inner(self) -> Result<ColumnStore> {
        self.inner
            .into_inner()
            .map_err(|_| PipelineError::AggregatePoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_merges_lose_no_values() {
        let aggregate = SharedAggregate::new();

        std::thread::scope(|scope| {
            for worker in 0..16 {
                let aggregate = &aggregate;
                scope.spawn(move || {
                    for batch in 0..50 {
                        let store: ColumnStore = [
                            (
                                "amount",
                                vec![format!("{worker}-{batch}-a"), format!("{worker}-{batch}-b")],
                            ),
                            ("date", vec![format!("{worker}-{batch}")]),
                        ]
                        .into_iter()
                        .collect();
                        aggregate.merge(store).unwrap();
                    }
                });
            }
        });

        let merged = aggregate.into_inner().unwrap();
        assert_eq!(merged.get("amount").map(<[String]>::len), Some(16 * 50 * 2));
        assert_eq!(merged.get("date").map(<[String]>::len), Some(16 * 50));
    }

    #[test]
    fn merge_preserves_per_file_order() {
        let aggregate = SharedAggregate::new();
        aggregate
            .merge([("amount", vec!["1", "2"])].into_iter().collect())
            .unwrap();
        aggregate
            .merge([("amount", vec!["3"])].into_iter().collect())
            .unwrap();

        let merged = aggregate.into_inner().unwrap();
        assert_eq!(
            merged.get("amount").unwrap(),
            &["1".to_string(), "2".to_string(), "3".to_string()]
        );
    }
}
