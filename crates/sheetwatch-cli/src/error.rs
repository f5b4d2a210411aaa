//! Error types for the sheetwatch-cli crate.

use thiserror::Error;

/// Fatal errors that abort an alert run.
///
/// Per-recipient delivery and audit failures are not here: the runner logs
/// those and continues with the remaining recipients.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input table could not be fetched.
    #[error(transparent)]
    Table(#[from] sheetwatch_tables::TableError),

    /// The delivery transport could not be set up.
    #[error(transparent)]
    Notify(#[from] sheetwatch_notify::NotifyError),

    /// The run was misconfigured.
    #[error("configuration error: {reason}")]
    Config {
        /// What was missing or inconsistent.
        reason: String,
    },

    /// Output could not be written.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_errors_pass_through_display() {
        let err = CliError::from(sheetwatch_tables::TableError::NotFound {
            name: "Latest".to_string(),
        });
        assert_eq!(err.to_string(), "table not found: Latest");
    }

    #[test]
    fn config_error_display() {
        let err = CliError::Config {
            reason: "SMTP credentials are required to send".to_string(),
        };
        assert!(err.to_string().starts_with("configuration error:"));
    }
}
