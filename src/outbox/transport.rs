//! The outbound mail channel for queue delivery

use std::collections::HashSet;
use std::sync::RwLock;

use crate::alert::SmtpConfig;
use crate::observability::Logger;

use super::errors::{TransportError, TransportResult};
use super::message::QueuedEmail;

/// Delivery channel for queued emails. A returned error means the attempt
/// failed and the item goes through the retry state machine.
pub trait MailTransport: Send + Sync {
    fn deliver(&self, email: &QueuedEmail) -> TransportResult<()>;
}

/// Mock transport: records deliveries, fails for listed addresses.
#[derive(Debug, Default)]
pub struct MockMailTransport {
    pub delivered: RwLock<Vec<QueuedEmail>>,
    rejected: RwLock<HashSet<String>>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make delivery to the given address fail.
    pub fn reject(&self, address: impl Into<String>) {
        self.rejected.write().unwrap().insert(address.into());
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.read().unwrap().len()
    }
}

impl MailTransport for MockMailTransport {
    fn deliver(&self, email: &QueuedEmail) -> TransportResult<()> {
        if self.rejected.read().unwrap().contains(&email.email) {
            return Err(TransportError::DeliveryFailed(format!(
                "rejected address: {}",
                email.email
            )));
        }
        self.delivered.write().unwrap().push(email.clone());
        Ok(())
    }
}

/// Transport for runs without SMTP configured: each notice becomes one
/// log line and counts as delivered, so local runs against copied tables
/// drain their queue instead of retrying forever.
#[derive(Debug, Default)]
pub struct LogMailTransport;

impl LogMailTransport {
    pub fn new() -> Self {
        Self
    }
}

impl MailTransport for LogMailTransport {
    fn deliver(&self, email: &QueuedEmail) -> TransportResult<()> {
        Logger::info(
            "NOTICE_LOGGED",
            &[
                ("id", &email.id),
                ("to", &email.email),
                ("subject", &email.subject),
            ],
        );
        Ok(())
    }
}

/// SMTP transport over lettre; bodies go out as HTML.
pub struct SmtpMailTransport {
    config: SmtpConfig,
}

impl SmtpMailTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl MailTransport for SmtpMailTransport {
    fn deliver(&self, email: &QueuedEmail) -> TransportResult<()> {
        use lettre::{message::header::ContentType, Message, Transport};

        let message = Message::builder()
            .from(self.config.from_mailbox().parse().map_err(|e| {
                TransportError::BuildFailed(format!("invalid from address: {}", e))
            })?)
            .to(email.email.parse().map_err(|e| {
                TransportError::BuildFailed(format!("invalid to address: {}", e))
            })?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| TransportError::BuildFailed(format!("failed to build message: {}", e)))?;

        let mailer = self
            .config
            .transport()
            .map_err(TransportError::DeliveryFailed)?;

        mailer
            .send(&message)
            .map_err(|e| TransportError::DeliveryFailed(e.to_string()))?;

        Ok(())
    }
}
