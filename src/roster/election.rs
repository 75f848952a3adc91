//! Elections and their key/value configuration table
//!
//! `ElectionConfig` is a plain settings row (the form subsystem keys off
//! it); `Election` is the election lifecycle record with a closed status
//! set and an ordered open/close window.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::field::{
    optional_string, optional_timestamp, require_enum, require_ordered, require_string, truthy,
    FieldError, FieldResult,
};
use crate::record::{encode_timestamp, FieldMap, TableRecord};

/// One settings row: a required key plus free-form setting and value.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectionConfig {
    pub key: String,
    pub setting: String,
    pub value: String,
}

impl TableRecord for ElectionConfig {
    const KIND: &'static str = "ElectionConfig";

    fn headers() -> &'static [&'static str] {
        &["Key", "Setting", "Value"]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        Ok(ElectionConfig {
            key: require_string("Key", fields.get("Key"))?,
            setting: optional_string("Setting", fields.get("Setting")),
            value: optional_string("Value", fields.get("Value")),
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.key.clone()),
            Value::String(self.setting.clone()),
            Value::String(self.value.clone()),
        ]
    }
}

/// Election lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionStatus {
    Draft,
    Open,
    Closed,
}

impl ElectionStatus {
    pub const ALLOWED: &'static [&'static str] = &["DRAFT", "OPEN", "CLOSED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElectionStatus::Draft => "DRAFT",
            ElectionStatus::Open => "OPEN",
            ElectionStatus::Closed => "CLOSED",
        }
    }

    fn from_cell(field: &str, value: Option<&Value>) -> FieldResult<Self> {
        match require_enum(field, value, Self::ALLOWED)?.as_str() {
            "DRAFT" => Ok(ElectionStatus::Draft),
            "OPEN" => Ok(ElectionStatus::Open),
            "CLOSED" => Ok(ElectionStatus::Closed),
            other => Err(FieldError::not_in_set(field, Self::ALLOWED, other)),
        }
    }
}

/// One election.
#[derive(Debug, Clone, PartialEq)]
pub struct Election {
    pub id: String,
    pub title: String,
    pub status: ElectionStatus,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub form_url: String,
    /// Whether the announcement notice has gone out.
    pub announced: bool,
}

impl TableRecord for Election {
    const KIND: &'static str = "Election";

    fn headers() -> &'static [&'static str] {
        &[
            "Id",
            "Title",
            "Status",
            "OpensAt",
            "ClosesAt",
            "FormUrl",
            "Announced",
        ]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        let opens_at = optional_timestamp("OpensAt", fields.get("OpensAt"))?;
        let closes_at = optional_timestamp("ClosesAt", fields.get("ClosesAt"))?;
        require_ordered("OpensAt", opens_at, "ClosesAt", closes_at)?;

        Ok(Election {
            id: require_string("Id", fields.get("Id"))?,
            title: require_string("Title", fields.get("Title"))?,
            status: ElectionStatus::from_cell("Status", fields.get("Status"))?,
            opens_at,
            closes_at,
            form_url: optional_string("FormUrl", fields.get("FormUrl")),
            announced: truthy(fields.get("Announced")),
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.id.clone()),
            Value::String(self.title.clone()),
            Value::String(self.status.as_str().to_string()),
            encode_timestamp(self.opens_at),
            encode_timestamp(self.closes_at),
            Value::String(self.form_url.clone()),
            Value::Bool(self.announced),
        ]
    }
}
