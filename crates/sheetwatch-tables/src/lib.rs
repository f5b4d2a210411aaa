//! Tabular data model and table-source boundary for Sheetwatch.
//!
//! The alert engine reads two tables each run (current metric readings and
//! threshold rules) and appends audit rows to a third. This crate owns the
//! shapes those tables take in memory and the [`TableSource`] trait that
//! hides whatever store actually holds them.
//!
//! - [`Table`] — header row plus data rows of display strings
//! - [`Record`] — one data row keyed by header name
//! - [`TableSource`] — fetch/append boundary to the store
//! - [`JsonTableSource`] — directory of `<table>.json` files
//! - [`MemoryTableSource`] — in-memory fake for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod source;
pub mod table;

pub use error::{Result, TableError};
pub use source::{JsonTableSource, MemoryTableSource, TableSource};
pub use table::{Record, Table};
