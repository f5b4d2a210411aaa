//! Error types for the sheetwatch-notify crate.

use thiserror::Error;

/// Errors that can occur while composing or delivering a message.
///
/// These are recipient-tier failures: the runner logs them and moves on
/// to the next recipient.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// An address could not be parsed into a mailbox.
    #[error("invalid address {address:?}: {reason}")]
    BadAddress {
        /// The offending address text.
        address: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The message itself could not be assembled.
    #[error("failed to compose message: {reason}")]
    Compose {
        /// Why composition failed.
        reason: String,
    },

    /// The transport could not be configured.
    #[error("transport setup failed: {reason}")]
    Transport {
        /// Why setup failed.
        reason: String,
    },

    /// The transport accepted the message but delivery failed.
    #[error("delivery to {recipient} failed: {reason}")]
    Delivery {
        /// The recipient whose delivery failed.
        recipient: String,
        /// Why delivery failed.
        reason: String,
    },
}

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
