//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while ingesting a single input file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Dispatch Errors ===
    /// No ingestor is registered for the file's extension.
    #[error("cannot parse {path}: unsupported file kind '{extension}'")]
    UnsupportedKind { path: PathBuf, extension: String },

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected a record.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },
}

impl IngestError {
    /// Classify an error raised while opening `path`.
    pub(crate) fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedKind {
            path: PathBuf::from("/data/statement.xml"),
            extension: "xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse /data/statement.xml: unsupported file kind 'xml'"
        );
    }

    #[test]
    fn test_not_found_is_classified() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = IngestError::open(std::path::Path::new("missing.csv"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = IngestError::open(std::path::Path::new("locked.csv"), io);
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
