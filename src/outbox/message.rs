//! The queued email record and its retry state machine
//!
//! A `QueuedEmail` is Pending while attempts remain below its effective
//! cap, Dead once the cap is reached. Dead is terminal: `record_failure`
//! on a dead item is a no-op, and the only way out of the queue is a
//! confirmed delivery or an operator purge.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::field::{
    optional_count, optional_string, optional_timestamp, require_count, require_email,
    require_string, truthy, FieldResult,
};
use crate::record::{encode_count, encode_timestamp, FieldMap, TableRecord};

use super::retry::RetryPolicy;

/// One pending (or dead-lettered) outbound email.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEmail {
    pub id: String,
    pub email: String,
    pub subject: String,
    pub html_body: String,
    /// Delivery attempts made so far.
    pub attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// `None` = due now (never attempted, or dead).
    pub next_attempt_at: Option<DateTime<Utc>>,
    /// Diagnostic from the most recent failed attempt.
    pub last_error: String,
    /// Per-item attempt cap; `None` = use the policy default.
    pub max_attempts: Option<u32>,
    /// Terminal dead-letter flag.
    pub dead: bool,
}

impl QueuedEmail {
    /// Enqueues a fresh notice: zero attempts, fresh v4 id, not dead.
    /// The address is format-checked; subject and body must be non-blank.
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> FieldResult<Self> {
        let email = email.into();
        let subject = subject.into();
        let html_body = html_body.into();

        let email = require_email("Email", Some(&Value::String(email)))?;
        let subject = require_string("Subject", Some(&Value::String(subject)))?;
        let html_body = require_string("HtmlBody", Some(&Value::String(html_body)))?;

        Ok(QueuedEmail {
            id: Uuid::new_v4().to_string(),
            email,
            subject,
            html_body,
            attempts: 0,
            last_attempt_at: None,
            next_attempt_at: None,
            last_error: String::new(),
            max_attempts: None,
            dead: false,
        })
    }

    /// Whether the item should be attempted now: not dead, and either
    /// never scheduled or scheduled at or before `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if self.dead {
            return false;
        }
        match self.next_attempt_at {
            None => true,
            Some(at) => at <= now,
        }
    }

    /// Records one failed delivery attempt at time `t`.
    ///
    /// Attempts increment, the diagnostic is kept, and either the next
    /// attempt is scheduled by the policy's backoff or the item
    /// dead-letters once the effective cap is reached. No-op on a dead
    /// item: `dead` is monotonic.
    pub fn record_failure(&mut self, t: DateTime<Utc>, error: &str, policy: &RetryPolicy) {
        if self.dead {
            return;
        }

        self.attempts += 1;
        self.last_attempt_at = Some(t);
        self.last_error = error.to_string();

        if self.attempts >= policy.effective_max(self.max_attempts) {
            self.dead = true;
            self.next_attempt_at = None;
        } else {
            self.next_attempt_at = Some(t + policy.backoff(self.attempts));
        }
    }
}

impl TableRecord for QueuedEmail {
    const KIND: &'static str = "QueuedEmail";

    fn headers() -> &'static [&'static str] {
        &[
            "Id",
            "Email",
            "Subject",
            "HtmlBody",
            "Attempts",
            "LastAttemptAt",
            "NextAttemptAt",
            "LastError",
            "MaxAttempts",
            "Dead",
        ]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        Ok(QueuedEmail {
            id: require_string("Id", fields.get("Id"))?,
            email: require_email("Email", fields.get("Email"))?,
            subject: require_string("Subject", fields.get("Subject"))?,
            html_body: require_string("HtmlBody", fields.get("HtmlBody"))?,
            attempts: require_count("Attempts", fields.get("Attempts"))?,
            last_attempt_at: optional_timestamp("LastAttemptAt", fields.get("LastAttemptAt"))?,
            next_attempt_at: optional_timestamp("NextAttemptAt", fields.get("NextAttemptAt"))?,
            last_error: optional_string("LastError", fields.get("LastError")),
            max_attempts: optional_count("MaxAttempts", fields.get("MaxAttempts"))?,
            dead: truthy(fields.get("Dead")),
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.id.clone()),
            Value::String(self.email.clone()),
            Value::String(self.subject.clone()),
            Value::String(self.html_body.clone()),
            Value::from(self.attempts),
            encode_timestamp(self.last_attempt_at),
            encode_timestamp(self.next_attempt_at),
            Value::String(self.last_error.clone()),
            encode_count(self.max_attempts),
            Value::Bool(self.dead),
        ]
    }
}
