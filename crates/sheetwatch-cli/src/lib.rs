//! # sheetwatch-cli
//!
//! The command-line alert runner. Wires a table source, a delivery
//! channel, and an audit sink into one sequential run: evaluate the rule
//! table against the current readings, send one consolidated message per
//! recipient, and leave an audit row behind for each.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use cli::Cli;
pub use config::RunConfig;
pub use error::{CliError, Result};
pub use runner::{RunReport, run_alerts};
