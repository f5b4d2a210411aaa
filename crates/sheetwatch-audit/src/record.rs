//! Audit records.
//!
//! One [`AuditRecord`] is written per recipient that was (or would have
//! been) notified in a run. The record carries enough to reconstruct the
//! message after the fact: who, what, when, and the provenance of the
//! tables the run read from.

use serde::{Deserialize, Serialize};

/// A single audit row describing one recipient's notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the row was written (ISO 8601, seconds precision).
    pub timestamp: String,
    /// The run this row belongs to. All rows of one run share it.
    pub run_id: String,
    /// The recipient the message went to.
    pub recipient: String,
    /// The message subject.
    pub subject: String,
    /// How many alerts the message carried.
    pub trigger_count: usize,
    /// Compact one-line summary of the triggered checks.
    pub summary: String,
    /// The full plain-text body as sent.
    pub body: String,
    /// Identifier of the table source the run read from.
    pub source_id: String,
    /// Name of the metrics table the readings came from.
    pub metrics_table: String,
    /// Name of the rules table the rules came from.
    pub rules_table: String,
}

impl AuditRecord {
    /// Flattens the record into a table row.
    ///
    /// Column order is fixed and append-only; new columns go on the end so
    /// existing audit tables stay readable.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.run_id.clone(),
            self.recipient.clone(),
            self.subject.clone(),
            self.trigger_count.to_string(),
            self.summary.clone(),
            self.body.clone(),
            self.source_id.clone(),
            self.metrics_table.clone(),
            self.rules_table.clone(),
        ]
    }
}
