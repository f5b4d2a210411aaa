//! # sheetwatch-audit
//!
//! Audit trail for Sheetwatch runs.
//!
//! Every recipient notification leaves one [`AuditRecord`] behind, appended
//! as a row to a table in the same store the run read its inputs from. The
//! trail is best-effort: a failed append is logged and the run continues.
//!
//! ## Example
//!
//! ```rust
//! use sheetwatch_audit::{AuditRecord, AuditSink, TableAuditSink};
//! use sheetwatch_tables::{MemoryTableSource, Table};
//!
//! let source = MemoryTableSource::new("mem");
//! source.insert(Table {
//!     name: "Logs".to_string(),
//!     headers: vec!["Timestamp".to_string()],
//!     rows: vec![],
//! });
//!
//! let sink = TableAuditSink::new(&source, "Logs");
//! let record = AuditRecord {
//!     timestamp: "2026-06-30T09:00:00".to_string(),
//!     run_id: "run-1".to_string(),
//!     recipient: "a@x.com".to_string(),
//!     subject: "[Metric Alert] 1 trigger(s) detected".to_string(),
//!     trigger_count: 1,
//!     summary: "Revenue v MoM=6.50% (rule: above 5.00%)".to_string(),
//!     body: "Triggered at: ...".to_string(),
//!     source_id: "mem".to_string(),
//!     metrics_table: "Latest".to_string(),
//!     rules_table: "Config".to_string(),
//! };
//! sink.append(&record).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod record;
pub mod sink;

pub use error::{AuditError, Result};
pub use record::AuditRecord;
pub use sink::{AuditSink, NoopAuditSink, TableAuditSink};
