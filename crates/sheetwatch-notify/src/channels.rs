//! Message delivery channels.
//!
//! [`MessageChannel`] is the outbound boundary: one message, one
//! recipient, one send. [`SmtpChannel`] delivers over SMTP with STARTTLS;
//! [`LogChannel`] only logs what would have been sent and backs the
//! simulate and suppress-send run modes as well as the tests.

use std::fmt;

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{NotifyError, Result};

/// A message addressed to exactly one recipient.
///
/// Batches never share a message: a rule naming several recipients
/// produces one [`OutboundMessage`] per recipient, not a carbon copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// The single recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML alternative body.
    pub html_body: String,
}

/// Proof that a channel accepted a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The channel that handled the message.
    pub channel: String,
    /// Optional transport detail (response code, log note).
    pub detail: Option<String>,
}

impl DeliveryReceipt {
    /// Creates a receipt for the named channel.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            detail: None,
        }
    }

    /// Attaches a transport detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Trait for message delivery channels.
pub trait MessageChannel: Send + Sync + fmt::Debug {
    /// Returns the name of this channel.
    fn name(&self) -> &str;

    /// Sends one message to its single recipient.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] when the address is invalid, the message
    /// cannot be composed, or the transport rejects it.
    fn send(&self, message: &OutboundMessage) -> Result<DeliveryReceipt>;
}

/// SMTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Login user; also the envelope sender address.
    pub username: String,
    /// Login password (app password).
    pub password: String,
    /// Display name for the `From` header.
    pub sender_name: String,
}

/// An SMTP delivery channel (STARTTLS, credential login, multipart
/// text + HTML).
pub struct SmtpChannel {
    settings: SmtpSettings,
    transport: SmtpTransport,
}

impl fmt::Debug for SmtpChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpChannel")
            .field("host", &self.settings.host)
            .field("port", &self.settings.port)
            .field("username", &self.settings.username)
            .finish_non_exhaustive()
    }
}

impl SmtpChannel {
    /// Builds the channel and its transport. No connection is made until
    /// the first send.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the relay cannot be configured.
    pub fn new(settings: SmtpSettings) -> Result<Self> {
        let transport = SmtpTransport::starttls_relay(&settings.host)
            .map_err(|e| NotifyError::Transport {
                reason: e.to_string(),
            })?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            settings,
            transport,
        })
    }

    fn sender_mailbox(&self) -> Result<Mailbox> {
        let from = format!("{} <{}>", self.settings.sender_name, self.settings.username);
        from.parse().map_err(|e: lettre::address::AddressError| {
            NotifyError::BadAddress {
                address: from.clone(),
                reason: e.to_string(),
            }
        })
    }
}

impl MessageChannel for SmtpChannel {
    fn name(&self) -> &str {
        "smtp"
    }

    fn send(&self, message: &OutboundMessage) -> Result<DeliveryReceipt> {
        let to: Mailbox =
            message
                .to
                .parse()
                .map_err(|e: lettre::address::AddressError| NotifyError::BadAddress {
                    address: message.to.clone(),
                    reason: e.to_string(),
                })?;

        let email = Message::builder()
            .from(self.sender_mailbox()?)
            .to(to)
            .subject(&message.subject)
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| NotifyError::Compose {
                reason: e.to_string(),
            })?;

        self.transport
            .send(&email)
            .map_err(|e| NotifyError::Delivery {
                recipient: message.to.clone(),
                reason: e.to_string(),
            })?;

        info!(to = %message.to, subject = %message.subject, "message delivered");
        Ok(DeliveryReceipt::new(self.name()))
    }
}

/// A channel that logs messages instead of delivering them.
#[derive(Debug, Clone)]
pub struct LogChannel {
    name: String,
}

impl LogChannel {
    /// Creates a new log channel.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new("log")
    }
}

impl MessageChannel for LogChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, message: &OutboundMessage) -> Result<DeliveryReceipt> {
        info!(
            channel = %self.name,
            to = %message.to,
            subject = %message.subject,
            "would send message"
        );
        debug!(body = %message.text_body, "message body");
        Ok(DeliveryReceipt::new(self.name()).with_detail("logged only"))
    }
}
