//! The alert gateway trait and its implementations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::observability::Logger;

use super::errors::{AlertError, AlertResult};
use super::smtp::SmtpConfig;

/// One operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound notification channel. `send` may fail; callers at the batch
/// boundary catch and log, never propagate.
pub trait AlertGateway: Send + Sync {
    fn send(&self, alert: &Alert) -> AlertResult<()>;
}

/// Mock gateway for tests: records every send, optionally fails.
#[derive(Debug, Default)]
pub struct MockAlertGateway {
    pub sent: RwLock<Vec<Alert>>,
    failing: AtomicBool,
}

impl MockAlertGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts sent so far.
    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }

    /// Copy of the last alert sent, if any.
    pub fn last_sent(&self) -> Option<Alert> {
        self.sent.read().unwrap().last().cloned()
    }

    /// Make every subsequent send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.sent.write().unwrap().clear();
    }
}

impl AlertGateway for MockAlertGateway {
    fn send(&self, alert: &Alert) -> AlertResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AlertError::SendFailed("injected failure".to_string()));
        }
        self.sent.write().unwrap().push(alert.clone());
        Ok(())
    }
}

/// Gateway for runs without SMTP configured: every alert becomes one
/// log line. Never fails, never accumulates state.
#[derive(Debug, Default)]
pub struct LogAlertGateway;

impl LogAlertGateway {
    pub fn new() -> Self {
        Self
    }
}

impl AlertGateway for LogAlertGateway {
    fn send(&self, alert: &Alert) -> AlertResult<()> {
        Logger::info(
            "ALERT_LOGGED",
            &[
                ("to", &alert.to),
                ("subject", &alert.subject),
                ("body", &alert.body),
            ],
        );
        Ok(())
    }
}

/// SMTP gateway over lettre.
pub struct SmtpAlertGateway {
    config: SmtpConfig,
}

impl SmtpAlertGateway {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl AlertGateway for SmtpAlertGateway {
    fn send(&self, alert: &Alert) -> AlertResult<()> {
        use lettre::{message::header::ContentType, Message, Transport};

        let email = Message::builder()
            .from(
                self.config
                    .from_mailbox()
                    .parse()
                    .map_err(|e| AlertError::BuildFailed(format!("invalid from address: {}", e)))?,
            )
            .to(alert
                .to
                .parse()
                .map_err(|e| AlertError::BuildFailed(format!("invalid to address: {}", e)))?)
            .subject(alert.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body.clone())
            .map_err(|e| AlertError::BuildFailed(format!("failed to build message: {}", e)))?;

        let mailer = self.config.transport().map_err(AlertError::SendFailed)?;

        mailer
            .send(&email)
            .map_err(|e| AlertError::SendFailed(e.to_string()))?;

        Ok(())
    }
}
