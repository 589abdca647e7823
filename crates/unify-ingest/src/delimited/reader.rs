//! CSV file reading into column stores.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use unify_model::ColumnStore;

use crate::error::{IngestError, Result};
use crate::registry::Ingestor;

/// Ingestor for delimited text with a single header row.
#[derive(Debug, Clone, Copy)]
pub struct CsvIngestor {
    delimiter: u8,
}

impl Default for CsvIngestor {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvIngestor {
    /// Use `delimiter` instead of a comma.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Ingestor for CsvIngestor {
    fn kind(&self) -> &'static str {
        "csv"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn ingest(&self, path: &Path) -> Result<ColumnStore> {
        read_csv_columns(path, self.delimiter)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

/// Reads a delimited file into one column per header cell.
///
/// Rows shorter than the header are padded with empty cells and cells beyond
/// the header are ignored, so every column ends up with one value per row.
/// A file without a header row is rejected with [`IngestError::EmptyCsv`].
pub fn read_csv_columns(path: &Path, delimiter: u8) -> Result<ColumnStore> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut overflow_rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.len() > headers.len() {
            overflow_rows += 1;
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(record.get(idx).map(normalize_cell).unwrap_or_default());
        }
    }
    if overflow_rows > 0 {
        tracing::debug!(
            path = %path.display(),
            rows = overflow_rows,
            "ignored cells beyond the header width"
        );
    }

    let mut store = ColumnStore::new();
    for (name, values) in headers.into_iter().zip(columns) {
        if store.insert(name.clone(), values).is_some() {
            tracing::warn!(
                path = %path.display(),
                column = %name,
                "duplicate header; keeping the rightmost column"
            );
        }
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_reads_columns_in_row_order() {
        let file = create_temp_csv("date,amount\nJan 05 2020,10.00\nJan 06 2020,11.50\n");
        let store = read_csv_columns(file.path(), b',').unwrap();

        assert_eq!(store.width(), 2);
        assert_eq!(
            store.get("date").unwrap(),
            &["Jan 05 2020".to_string(), "Jan 06 2020".to_string()]
        );
        assert_eq!(
            store.get("amount").unwrap(),
            &["10.00".to_string(), "11.50".to_string()]
        );
    }

    #[test]
    fn test_strips_bom_and_whitespace_from_headers() {
        let file = create_temp_csv("\u{feff} euro , cents\n10,50\n");
        let store = read_csv_columns(file.path(), b',').unwrap();

        assert!(store.contains("euro"));
        assert!(store.contains("cents"));
    }

    #[test]
    fn test_pads_short_rows_and_ignores_extra_cells() {
        let file = create_temp_csv("a,b\n1\n2,3,4\n");
        let store = read_csv_columns(file.path(), b',').unwrap();

        assert_eq!(store.get("a").unwrap(), &["1".to_string(), "2".to_string()]);
        assert_eq!(store.get("b").unwrap(), &[String::new(), "3".to_string()]);
    }

    #[test]
    fn test_header_only_yields_empty_columns() {
        let file = create_temp_csv("timestamp,type\n");
        let store = read_csv_columns(file.path(), b',').unwrap();

        assert_eq!(store.width(), 2);
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let file = create_temp_csv("");
        let result = read_csv_columns(file.path(), b',');

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let file = create_temp_csv("type;amounts\nadd;1.00\n");
        let store = CsvIngestor::default()
            .with_delimiter(b';')
            .ingest(file.path())
            .unwrap();

        assert_eq!(store.get("type").unwrap(), &["add".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_columns(Path::new("/nonexistent/bank.csv"), b',');
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
