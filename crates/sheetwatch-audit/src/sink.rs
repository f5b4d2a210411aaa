//! Audit sinks.
//!
//! [`AuditSink`] is where finished records go. The production sink appends
//! them as rows to a table in the same store the run reads from; the no-op
//! sink backs the suppress-audit run mode.

use sheetwatch_tables::TableSource;
use tracing::{debug, info};

use crate::error::{AuditError, Result};
use crate::record::AuditRecord;

/// Trait for audit record destinations.
pub trait AuditSink {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditError`] if the record could not be persisted.
    fn append(&self, record: &AuditRecord) -> Result<()>;
}

/// An audit sink that appends rows to a named table.
pub struct TableAuditSink<'a, S: TableSource> {
    source: &'a S,
    table: String,
}

impl<'a, S: TableSource> TableAuditSink<'a, S> {
    /// Creates a sink writing to the given table of the given source.
    #[must_use]
    pub fn new(source: &'a S, table: impl Into<String>) -> Self {
        Self {
            source,
            table: table.into(),
        }
    }
}

impl<S: TableSource> AuditSink for TableAuditSink<'_, S> {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        self.source
            .append(&self.table, record.to_row())
            .map_err(|source| AuditError::Append {
                table: self.table.clone(),
                source,
            })?;
        info!(
            table = %self.table,
            run_id = %record.run_id,
            recipient = %record.recipient,
            triggers = record.trigger_count,
            "audit row appended"
        );
        Ok(())
    }
}

/// A sink that drops records, logging only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl NoopAuditSink {
    /// Creates a new no-op sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for NoopAuditSink {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        debug!(
            run_id = %record.run_id,
            recipient = %record.recipient,
            "audit suppressed"
        );
        Ok(())
    }
}
