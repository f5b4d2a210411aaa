//! Threshold rule evaluation and recipient grouping for Sheetwatch.
//!
//! The engine is the pure core of the alert system: it types raw cell
//! text, validates config rows into rules, matches rules against current
//! metric readings, and regroups the alerts that fired by recipient.
//! It performs no I/O and holds no state between runs.
//!
//! # Example
//!
//! ```rust
//! use sheetwatch_engine::{evaluate, group_by_recipient};
//! use sheetwatch_tables::Table;
//!
//! let readings = Table::from_values("Latest", vec![
//!     vec!["Metric".into(), "v MoM".into()],
//!     vec!["Revenue".into(), "6.5%".into()],
//! ]).unwrap();
//!
//! let rules = Table::from_values("Config", vec![
//!     vec!["Enabled".into(), "Metric".into(), "Check".into(),
//!          "Direction".into(), "Recipients".into(), "Threshold Pct".into()],
//!     vec!["TRUE".into(), "Revenue".into(), "v MoM".into(),
//!          "above".into(), "a@x.com".into(), "5".into()],
//! ]).unwrap();
//!
//! let evaluation = evaluate(&readings, &rules);
//! assert_eq!(evaluation.triggered.len(), 1);
//!
//! let batches = group_by_recipient(&evaluation.triggered);
//! assert_eq!(batches[0].recipient, "a@x.com");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod eval;
pub mod group;
pub mod parse;
pub mod rule;

pub use error::{EngineError, Result};
pub use eval::{
    CURRENT_VALUE_COLUMN, Evaluation, METRIC_COLUMN, MetricReading, PERIOD_COLUMN, ReadingIndex,
    RuleOutcome, TriggeredAlert, evaluate, evaluate_rule,
};
pub use group::{RecipientBatch, group_by_recipient};
pub use parse::{parse_bool, parse_percent, parse_recipients};
pub use rule::{AlertRule, Direction, SkipReason};
