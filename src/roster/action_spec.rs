//! Lifecycle action templates
//!
//! One row per notice the club sends: the trigger kind, the email subject
//! and body templates (with `{Field}` placeholders), and an optional day
//! offset relative to the member's expiry date.

use serde_json::Value;

use crate::field::{optional_number, require_enum, require_string, FieldError, FieldResult};
use crate::record::{FieldMap, TableRecord};

/// The closed set of lifecycle triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// Welcome notice, sent on the join date.
    Join,
    /// Renewal confirmation, sent relative to expiry.
    Renew,
    /// Expiration notice, sent on the expiry date.
    Expire,
    /// Renewal reminder, sent relative to expiry (offset usually negative).
    Remind,
}

impl ActionType {
    pub const ALLOWED: &'static [&'static str] = &["JOIN", "RENEW", "EXPIRE", "REMIND"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Join => "JOIN",
            ActionType::Renew => "RENEW",
            ActionType::Expire => "EXPIRE",
            ActionType::Remind => "REMIND",
        }
    }

    fn from_cell(field: &str, value: Option<&Value>) -> FieldResult<Self> {
        match require_enum(field, value, Self::ALLOWED)?.as_str() {
            "JOIN" => Ok(ActionType::Join),
            "RENEW" => Ok(ActionType::Renew),
            "EXPIRE" => Ok(ActionType::Expire),
            "REMIND" => Ok(ActionType::Remind),
            other => Err(FieldError::not_in_set(field, Self::ALLOWED, other)),
        }
    }
}

/// One notice template.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec {
    pub action_type: ActionType,
    pub subject: String,
    pub body: String,
    /// Days relative to the member's expiry date; may be negative
    /// (a reminder before expiry). `None` means "on the date itself".
    pub offset_days: Option<f64>,
}

impl TableRecord for ActionSpec {
    const KIND: &'static str = "ActionSpec";

    fn headers() -> &'static [&'static str] {
        &["Type", "Subject", "Body", "Offset"]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        Ok(ActionSpec {
            action_type: ActionType::from_cell("Type", fields.get("Type"))?,
            subject: require_string("Subject", fields.get("Subject"))?,
            body: require_string("Body", fields.get("Body"))?,
            offset_days: optional_number("Offset", fields.get("Offset"))?,
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.action_type.as_str().to_string()),
            Value::String(self.subject.clone()),
            Value::String(self.body.clone()),
            match self.offset_days {
                Some(n) => Value::from(n),
                None => Value::String(String::new()),
            },
        ]
    }
}
