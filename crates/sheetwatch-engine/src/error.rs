//! Error types for the sheetwatch-engine crate.

use thiserror::Error;

/// Errors raised while typing raw cell text.
///
/// These never escape an evaluation run: the evaluator converts each of
/// them into a per-rule skip. They exist as real errors so the parsers are
/// usable (and testable) on their own.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Cell text could not be read as a percentage value.
    #[error("not a percentage value: {text:?}")]
    BadPercent {
        /// The offending cell text.
        text: String,
    },

    /// A direction cell held something other than `above`/`below`/`abs`.
    #[error("unknown direction: {text:?}")]
    UnknownDirection {
        /// The offending cell text.
        text: String,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
