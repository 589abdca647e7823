//! Extension-based dispatch to file ingestors.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use unify_model::ColumnStore;

use crate::delimited::CsvIngestor;
use crate::error::{IngestError, Result};

/// A parser that turns one file of a supported kind into a raw [`ColumnStore`].
///
/// Implementations must be stateless with respect to individual files so a
/// single instance can be shared by every worker.
pub trait Ingestor: Send + Sync {
    /// Short human-readable name of the file kind (e.g. `"csv"`).
    fn kind(&self) -> &'static str;

    /// Lowercase file extensions handled by this ingestor, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Read the whole file into a raw column store.
    fn ingest(&self, path: &Path) -> Result<ColumnStore>;
}

/// Registry of ingestors keyed by lowercase file extension.
///
/// Kinds without a registered ingestor (XML and JSON today) resolve to
/// [`IngestError::UnsupportedKind`].
#[derive(Clone, Default)]
pub struct IngestorRegistry {
    by_extension: BTreeMap<String, Arc<dyn Ingestor>>,
}

impl IngestorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in ingestor.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CsvIngestor::default()));
        registry
    }

    /// Register `ingestor` for each of its extensions, replacing earlier entries.
    pub fn register(&mut self, ingestor: Arc<dyn Ingestor>) {
        for extension in ingestor.extensions() {
            self.by_extension
                .insert(extension.to_ascii_lowercase(), Arc::clone(&ingestor));
        }
    }

    /// Registered extensions in lexical order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.by_extension.keys().map(String::as_str)
    }

    /// Find the ingestor responsible for `path` by its extension.
    pub fn resolve(&self, path: &Path) -> Result<Arc<dyn Ingestor>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        self.by_extension
            .get(&extension)
            .cloned()
            .ok_or_else(|| IngestError::UnsupportedKind {
                path: path.to_path_buf(),
                extension,
            })
    }
}

impl fmt::Debug for IngestorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.by_extension
                    .iter()
                    .map(|(ext, ingestor)| (ext, ingestor.kind())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_csv_case_insensitively() {
        let registry = IngestorRegistry::with_defaults();
        let ingestor = registry.resolve(Path::new("bank2.CSV")).unwrap();
        assert_eq!(ingestor.kind(), "csv");
    }

    #[test]
    fn xml_and_json_are_unsupported() {
        let registry = IngestorRegistry::with_defaults();
        for name in ["statement.xml", "statement.json", "README"] {
            let err = registry.resolve(Path::new(name)).err().unwrap();
            assert!(
                matches!(err, IngestError::UnsupportedKind { .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = IngestorRegistry::new();
        assert_eq!(registry.extensions().count(), 0);
        assert!(registry.resolve(Path::new("a.csv")).is_err());
    }
}
