//! Message rendering and delivery channels for Sheetwatch.
//!
//! Takes the engine's per-recipient batches and turns them into messages:
//! [`render_message`] builds the subject, plain-text body, HTML body, and
//! the compact audit summary; [`MessageChannel`] implementations carry the
//! result to its single recipient.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod channels;
pub mod error;
pub mod render;

pub use channels::{
    DeliveryReceipt, LogChannel, MessageChannel, OutboundMessage, SmtpChannel, SmtpSettings,
};
pub use error::{NotifyError, Result};
pub use render::{RenderedMessage, render_message, render_subject, render_summary};
