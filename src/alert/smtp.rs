//! Shared SMTP configuration and transport construction
//!
//! Used by both the alert gateway and the outbox mail transport.

use lettre::transport::smtp::authentication::Credentials;
use lettre::SmtpTransport;

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Empty user means an unauthenticated local relay.
    pub user: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1025,
            user: String::new(),
            password: String::new(),
            from_email: "noreply@rollbook.local".to_string(),
            from_name: "Rollbook".to_string(),
        }
    }
}

impl SmtpConfig {
    /// `From:` mailbox string, `Name <addr>`.
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Builds the blocking transport: unauthenticated direct connection
    /// when no user is configured (local development relays), TLS relay
    /// with credentials otherwise.
    pub fn transport(&self) -> Result<SmtpTransport, String> {
        if self.user.is_empty() {
            Ok(SmtpTransport::builder_dangerous(&self.host)
                .port(self.port)
                .build())
        } else {
            let creds = Credentials::new(self.user.clone(), self.password.clone());
            Ok(SmtpTransport::relay(&self.host)
                .map_err(|e| format!("SMTP relay error: {}", e))?
                .credentials(creds)
                .port(self.port)
                .build())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mailbox_format() {
        let config = SmtpConfig::default();
        assert_eq!(config.from_mailbox(), "Rollbook <noreply@rollbook.local>");
    }

    #[test]
    fn test_unauthenticated_transport_builds() {
        let config = SmtpConfig::default();
        assert!(config.transport().is_ok());
    }
}
