//! Member bootstrap rows
//!
//! The roster as imported from the membership table. A member is looked up
//! either by id or by email, so at least one of the two must be present;
//! join and expiry dates are optional but must be ordered when both exist.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::field::{
    optional_email, optional_string, optional_timestamp, require_either, require_ordered,
    FieldResult,
};
use crate::record::{encode_timestamp, FieldMap, TableRecord};

/// One member row.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapRow {
    pub member_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub joined_on: Option<DateTime<Utc>>,
    pub expires_on: Option<DateTime<Utc>>,
}

impl TableRecord for BootstrapRow {
    const KIND: &'static str = "BootstrapRow";

    fn headers() -> &'static [&'static str] {
        &[
            "MemberId",
            "Email",
            "FirstName",
            "LastName",
            "JoinedOn",
            "ExpiresOn",
        ]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        let member_id = optional_string("MemberId", fields.get("MemberId"));
        let email = optional_email("Email", fields.get("Email"))?;
        require_either("MemberId", &member_id, "Email", &email)?;

        let joined_on = optional_timestamp("JoinedOn", fields.get("JoinedOn"))?;
        let expires_on = optional_timestamp("ExpiresOn", fields.get("ExpiresOn"))?;
        require_ordered("JoinedOn", joined_on, "ExpiresOn", expires_on)?;

        Ok(BootstrapRow {
            member_id,
            email,
            first_name: optional_string("FirstName", fields.get("FirstName")),
            last_name: optional_string("LastName", fields.get("LastName")),
            joined_on,
            expires_on,
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.member_id.clone()),
            Value::String(self.email.clone()),
            Value::String(self.first_name.clone()),
            Value::String(self.last_name.clone()),
            encode_timestamp(self.joined_on),
            encode_timestamp(self.expires_on),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers() -> Vec<String> {
        BootstrapRow::headers()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_email_only_member_is_valid() {
        let row = BootstrapRow::decode(
            &headers(),
            &[
                json!(""),
                json!("a@example.com"),
                json!("Ada"),
                json!("Lovelace"),
                json!("2026-01-01"),
                json!("2027-01-01"),
            ],
        )
        .unwrap();

        assert_eq!(row.member_id, "");
        assert_eq!(row.email, "a@example.com");
    }

    #[test]
    fn test_neither_key_rejected() {
        let err = BootstrapRow::decode(
            &headers(),
            &[json!(""), json!(""), json!("Ada"), json!(""), json!(""), json!("")],
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "at least one of MemberId or Email is required"
        );
    }

    #[test]
    fn test_bad_email_rejected_even_with_member_id() {
        let err = BootstrapRow::decode(
            &headers(),
            &[json!("m-9"), json!("not-an-address"), json!(""), json!(""), json!(""), json!("")],
        )
        .unwrap_err();

        assert!(err.to_string().contains("Email"));
    }

    #[test]
    fn test_expiry_before_join_rejected() {
        let err = BootstrapRow::decode(
            &headers(),
            &[
                json!("m-1"),
                json!(""),
                json!(""),
                json!(""),
                json!("2027-01-01"),
                json!("2026-01-01"),
            ],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "ExpiresOn must not be before JoinedOn");
    }
}
