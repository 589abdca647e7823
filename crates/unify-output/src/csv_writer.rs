//! Row-oriented CSV serialization of a column store.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use unify_model::{ColumnStore, canonical_column_order};

use crate::error::{OutputError, Result};

/// Name of the unified file when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "bank_unified_data.csv";

/// Options for CSV output.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Shape of a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenTable {
    pub columns: usize,
    /// Data rows, excluding the header.
    pub rows: usize,
}

/// Serialize `store` as header plus positionally zipped rows.
///
/// Columns appear in canonical order. Columns shorter than the longest one
/// contribute empty cells for the remaining rows. An empty store produces no
/// output at all.
pub fn write_table<W: Write>(
    writer: W,
    store: &ColumnStore,
    options: &WriteOptions,
) -> csv::Result<WrittenTable> {
    let columns: Vec<&[String]> = canonical_column_order(store)
        .into_iter()
        .map(|name| store.get(name).unwrap_or_default())
        .collect();
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);
    if columns.is_empty() {
        csv_writer.flush()?;
        return Ok(WrittenTable {
            columns: 0,
            rows: 0,
        });
    }

    csv_writer.write_record(canonical_column_order(store))?;
    let rows = store.row_count();
    for idx in 0..rows {
        csv_writer.write_record(
            columns
                .iter()
                .map(|values| values.get(idx).map_or("", String::as_str)),
        )?;
    }
    csv_writer.flush()?;
    Ok(WrittenTable {
        columns: columns.len(),
        rows,
    })
}

/// Render `store` to an in-memory CSV string.
pub fn render_unified_csv(store: &ColumnStore, options: &WriteOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, store, options).map_err(|source| OutputError::Csv {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_OUTPUT_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `store` to `path` atomically.
///
/// The table is written to a sibling temp file, synced, then renamed over
/// `path`. On failure the temp file is removed and `path` is left untouched.
pub fn write_unified_csv(
    path: &Path,
    store: &ColumnStore,
    options: &WriteOptions,
) -> Result<WrittenTable> {
    tracing::info!(path = %path.display(), "generating unified file");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp_file(&temp_path, store, options).and_then(|written| {
        fs::rename(&temp_path, path).map_err(|e| OutputError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;
        Ok(written)
    });

    match result {
        Ok(written) => {
            tracing::info!(
                path = %path.display(),
                columns = written.columns,
                rows = written.rows,
                "wrote unified file"
            );
            Ok(written)
        }
        Err(error) => {
            let _ = fs::remove_file(&temp_path);
            Err(error)
        }
    }
}

fn write_temp_file(
    temp_path: &Path,
    store: &ColumnStore,
    options: &WriteOptions,
) -> Result<WrittenTable> {
    let file = File::create(temp_path).map_err(|e| OutputError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    let written = write_table(&mut writer, store, options).map_err(|source| OutputError::Csv {
        path: temp_path.to_path_buf(),
        source,
    })?;
    let file = writer.into_inner().map_err(|e| OutputError::Io {
        operation: "flush",
        path: temp_path.to_path_buf(),
        source: e.into_error(),
    })?;
    file.sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path_for(Path::new("out/bank_unified_data.csv")),
            PathBuf::from("out/bank_unified_data.csv.tmp")
        );
    }

    #[test]
    fn empty_store_renders_nothing() {
        let rendered = render_unified_csv(&ColumnStore::new(), &WriteOptions::default()).unwrap();
        assert!(rendered.is_empty());
    }

    #[test]
    fn short_columns_are_padded_at_the_tail() {
        let store: ColumnStore = [
            ("date", vec!["05-01-2020"]),
            ("amount", vec!["10.00", "20.00", "30.00"]),
        ]
        .into_iter()
        .collect();

        let mut buffer = Vec::new();
        let written = write_table(&mut buffer, &store, &WriteOptions::default()).unwrap();

        assert_eq!(written, WrittenTable { columns: 2, rows: 3 });
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "date,amount\n05-01-2020,10.00\n,20.00\n,30.00\n"
        );
    }
}
