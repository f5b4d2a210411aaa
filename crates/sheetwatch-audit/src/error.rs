//! Error types for the sheetwatch-audit crate.

use thiserror::Error;

/// Errors that can occur while recording an audit row.
///
/// Audit failures never abort a run: the caller logs them and keeps going,
/// so the alert itself is still delivered even when the trail is not.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The backing table rejected the append.
    #[error("failed to append audit row to {table:?}: {source}")]
    Append {
        /// The audit table name.
        table: String,
        /// The underlying table error.
        #[source]
        source: sheetwatch_tables::TableError,
    },
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_table() {
        let err = AuditError::Append {
            table: "Logs".to_string(),
            source: sheetwatch_tables::TableError::NotFound {
                name: "Logs".to_string(),
            },
        };
        assert!(err.to_string().contains("\"Logs\""));
    }
}
