//! Table sources.
//!
//! [`TableSource`] is the boundary to the tabular store the alert run reads
//! its inputs from and appends its audit rows to. The remote spreadsheet
//! service itself (and its authentication) lives behind this trait; the
//! engine only ever sees [`Table`]s.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TableError};
use crate::table::Table;

/// A store of named tables.
///
/// `fetch` reads a whole table; `append` adds one row to the end of a
/// table. Appends must be atomic per row so the audit sink stays safe if a
/// future implementation runs recipients concurrently.
pub trait TableSource: Send + Sync {
    /// An identifier for this source, recorded as audit provenance.
    fn source_id(&self) -> &str;

    /// Reads a table by name.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the table is missing, unreadable, or has
    /// no header row.
    fn fetch(&self, table: &str) -> Result<Table>;

    /// Appends one data row to a table.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the table is missing or the write fails.
    fn append(&self, table: &str, row: Vec<String>) -> Result<()>;
}

/// On-disk JSON representation of a table: headers plus data rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableFile {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A table source backed by one JSON file per table in a directory.
///
/// Each table lives at `<dir>/<name>.json` as `{"headers": [...], "rows":
/// [[...], ...]}`. Writes go through a temp file followed by a rename, and a
/// process-wide lock serializes appends, so each appended row lands whole.
pub struct JsonTableSource {
    dir: PathBuf,
    id: String,
    write_lock: Mutex<()>,
}

impl JsonTableSource {
    /// Creates a source rooted at the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let id = dir.to_string_lossy().into_owned();
        Self {
            dir,
            id,
            write_lock: Mutex::new(()),
        }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.json"))
    }

    fn load_file(&self, table: &str) -> Result<TableFile> {
        let path = self.table_path(table);
        let text = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                TableError::NotFound {
                    name: table.to_string(),
                }
            } else {
                TableError::Io {
                    name: table.to_string(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&text).map_err(|e| TableError::Malformed {
            name: table.to_string(),
            reason: e.to_string(),
        })
    }

    fn store_file(&self, table: &str, file: &TableFile) -> Result<()> {
        let io_err = |source| TableError::Io {
            name: table.to_string(),
            source,
        };

        let json = serde_json::to_string_pretty(file).map_err(|e| TableError::Malformed {
            name: table.to_string(),
            reason: e.to_string(),
        })?;

        let path = self.table_path(table);
        let tmp = self.dir.join(format!(".{table}.json.tmp"));
        {
            let mut f = fs::File::create(&tmp).map_err(io_err)?;
            f.write_all(json.as_bytes()).map_err(io_err)?;
            f.sync_all().map_err(io_err)?;
        }
        fs::rename(&tmp, &path).map_err(io_err)
    }
}

impl TableSource for JsonTableSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn fetch(&self, table: &str) -> Result<Table> {
        let file = self.load_file(table)?;
        debug!(table, rows = file.rows.len(), "fetched table");
        Ok(Table {
            name: table.to_string(),
            headers: file.headers,
            rows: file.rows,
        })
    }

    fn append(&self, table: &str, row: Vec<String>) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut file = self.load_file(table)?;
        file.rows.push(row);
        self.store_file(table, &file)?;
        debug!(table, rows = file.rows.len(), "appended row");
        Ok(())
    }
}

/// An in-memory table source for tests and simulate runs.
#[derive(Debug, Default)]
pub struct MemoryTableSource {
    id: String,
    tables: Mutex<HashMap<String, Table>>,
}

impl MemoryTableSource {
    /// Creates an empty in-memory source with the given provenance id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts (or replaces) a table.
    pub fn insert(&self, table: Table) {
        self.tables.lock().insert(table.name.clone(), table);
    }

    /// Returns the current row count of a table, if present.
    #[must_use]
    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.tables.lock().get(table).map(|t| t.rows.len())
    }

    /// Returns a copy of a table's rows, if present.
    #[must_use]
    pub fn rows(&self, table: &str) -> Option<Vec<Vec<String>>> {
        self.tables.lock().get(table).map(|t| t.rows.clone())
    }
}

impl TableSource for MemoryTableSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn fetch(&self, table: &str) -> Result<Table> {
        self.tables
            .lock()
            .get(table)
            .cloned()
            .ok_or_else(|| TableError::NotFound {
                name: table.to_string(),
            })
    }

    fn append(&self, table: &str, row: Vec<String>) -> Result<()> {
        let mut tables = self.tables.lock();
        let entry = tables.get_mut(table).ok_or_else(|| TableError::NotFound {
            name: table.to_string(),
        })?;
        entry.rows.push(row);
        Ok(())
    }
}
