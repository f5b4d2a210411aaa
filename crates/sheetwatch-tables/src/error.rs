//! Error types for the sheetwatch-tables crate.

use thiserror::Error;

/// Errors raised by table sources.
///
/// All of these are setup-tier failures: a table that cannot be located or
/// parsed aborts the run rather than being skipped.
#[derive(Debug, Error)]
pub enum TableError {
    /// The named table does not exist in the source.
    #[error("table not found: {name}")]
    NotFound {
        /// The table name that was not found.
        name: String,
    },

    /// The table exists but contains no header row.
    #[error("table '{name}' has no header row")]
    MissingHeader {
        /// The table missing its header row.
        name: String,
    },

    /// The backing store could not be read or written.
    #[error("i/o error on table '{name}': {source}")]
    Io {
        /// The table being accessed.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing data is not a valid table representation.
    #[error("malformed table '{name}': {reason}")]
    Malformed {
        /// The table being parsed.
        name: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
