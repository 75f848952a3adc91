//! Audit trail entries
//!
//! Append-style rows recording who did what and when. `record` stamps the
//! current time for rows produced by this process; `decode` ingests rows
//! written by earlier runs.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::field::{optional_string, require_string, require_timestamp, FieldResult};
use crate::record::{FieldMap, TableRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub detail: String,
}

impl AuditEntry {
    /// New entry stamped with the current time.
    pub fn record(
        actor: impl Into<String>,
        action: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        AuditEntry {
            at: Utc::now(),
            actor: actor.into(),
            action: action.into(),
            detail: detail.into(),
        }
    }
}

impl TableRecord for AuditEntry {
    const KIND: &'static str = "AuditEntry";

    fn headers() -> &'static [&'static str] {
        &["At", "Actor", "Action", "Detail"]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        Ok(AuditEntry {
            at: require_timestamp("At", fields.get("At"))?,
            actor: require_string("Actor", fields.get("Actor"))?,
            action: require_string("Action", fields.get("Action"))?,
            detail: optional_string("Detail", fields.get("Detail")),
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.at.to_rfc3339()),
            Value::String(self.actor.clone()),
            Value::String(self.action.clone()),
            Value::String(self.detail.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers() -> Vec<String> {
        AuditEntry::headers().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_stamps_now() {
        let before = Utc::now();
        let entry = AuditEntry::record("cron", "PLAN", "queued 3 notices");
        assert!(entry.at >= before);
        assert_eq!(entry.actor, "cron");
    }

    #[test]
    fn test_timestamp_is_required() {
        let err = AuditEntry::decode(
            &headers(),
            &[json!(""), json!("cron"), json!("PLAN"), json!("")],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "At is required");
    }

    #[test]
    fn test_round_trip() {
        let entry = AuditEntry::decode(
            &headers(),
            &[
                json!("2026-02-01T09:00:00Z"),
                json!("operator"),
                json!("DRAIN"),
                json!("2 delivered"),
            ],
        )
        .unwrap();

        let again = AuditEntry::decode(&headers(), &entry.encode()).unwrap();
        assert_eq!(entry, again);
    }
}
