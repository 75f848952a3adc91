//! Configuration file handling
//!
//! One JSON file, serde defaults for everything optional, validated on
//! load. An absent `smtp` block means mock gateways: validation alerts
//! and notice deliveries are logged instead of sent, which is the right
//! behavior for local runs against copied tables.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::alert::SmtpConfig;
use crate::outbox::RetryPolicy;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the table files (required)
    pub data_dir: String,

    /// Operator address for validation alerts (required)
    pub alert_recipient: String,

    /// From address on alerts and notices
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// SMTP settings; absent = log instead of send
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,

    /// Default delivery attempt cap
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First retry delay in minutes (doubles each failure)
    #[serde(default = "default_backoff_initial_minutes")]
    pub backoff_initial_minutes: i64,

    /// Retry delay cap in hours
    #[serde(default = "default_backoff_cap_hours")]
    pub backoff_cap_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

fn default_from_email() -> String {
    "noreply@rollbook.local".to_string()
}
fn default_from_name() -> String {
    "Rollbook".to_string()
}
fn default_max_attempts() -> u32 {
    5
}
fn default_backoff_initial_minutes() -> i64 {
    10
}
fn default_backoff_cap_hours() -> i64 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            alert_recipient: "ops@example.com".to_string(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            smtp: None,
            max_attempts: default_max_attempts(),
            backoff_initial_minutes: default_backoff_initial_minutes(),
            backoff_cap_hours: default_backoff_cap_hours(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        if !self.alert_recipient.contains('@') {
            return Err(CliError::config_error(format!(
                "alert_recipient '{}' is not an email address",
                self.alert_recipient
            )));
        }
        if self.max_attempts == 0 {
            return Err(CliError::config_error("max_attempts must be > 0"));
        }
        if self.backoff_initial_minutes <= 0 {
            return Err(CliError::config_error("backoff_initial_minutes must be > 0"));
        }
        if self.backoff_cap_hours <= 0 {
            return Err(CliError::config_error("backoff_cap_hours must be > 0"));
        }
        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// SMTP settings folded with the from identity, when configured.
    pub fn smtp_config(&self) -> Option<SmtpConfig> {
        self.smtp.as_ref().map(|s| SmtpConfig {
            host: s.host.clone(),
            port: s.port,
            user: s.user.clone(),
            password: s.password.clone(),
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
        })
    }

    /// Retry policy from the configured knobs.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::doubling(
            self.max_attempts,
            Duration::minutes(self.backoff_initial_minutes),
            Duration::hours(self.backoff_cap_hours),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"data_dir": "./data", "alert_recipient": "ops@club.org"}"#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff_initial_minutes, 10);
        assert!(config.smtp.is_none());
        assert!(config.smtp_config().is_none());
    }

    #[test]
    fn test_bad_recipient_rejected() {
        let config = Config {
            alert_recipient: "not-an-address".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smtp_block_folds_from_identity() {
        let config: Config = serde_json::from_str(
            r#"{
                "data_dir": "./data",
                "alert_recipient": "ops@club.org",
                "from_email": "bot@club.org",
                "smtp": {"host": "smtp.club.org", "port": 587, "user": "bot", "password": "pw"}
            }"#,
        )
        .unwrap();

        let smtp = config.smtp_config().unwrap();
        assert_eq!(smtp.host, "smtp.club.org");
        assert_eq!(smtp.from_email, "bot@club.org");
    }

    #[test]
    fn test_retry_policy_from_knobs() {
        let config = Config {
            max_attempts: 3,
            backoff_initial_minutes: 5,
            ..Config::default()
        };

        let policy = config.retry_policy();
        assert_eq!(policy.default_max_attempts, 3);
        assert_eq!(policy.backoff(1), Duration::minutes(5));
        assert_eq!(policy.backoff(2), Duration::minutes(10));
    }
}
