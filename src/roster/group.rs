//! Public mailing groups
//!
//! The directory-service groups members may join. `AutoSubscribe` marks
//! groups every new member is added to.

use serde_json::Value;

use crate::field::{optional_string, require_email, require_string, truthy, FieldResult};
use crate::record::{FieldMap, TableRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PublicGroup {
    pub name: String,
    pub email: String,
    pub description: String,
    pub auto_subscribe: bool,
}

impl TableRecord for PublicGroup {
    const KIND: &'static str = "PublicGroup";

    fn headers() -> &'static [&'static str] {
        &["Name", "Email", "Description", "AutoSubscribe"]
    }

    fn from_fields(fields: &FieldMap) -> FieldResult<Self> {
        Ok(PublicGroup {
            name: require_string("Name", fields.get("Name"))?,
            email: require_email("Email", fields.get("Email"))?,
            description: optional_string("Description", fields.get("Description")),
            auto_subscribe: truthy(fields.get("AutoSubscribe")),
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::String(self.name.clone()),
            Value::String(self.email.clone()),
            Value::String(self.description.clone()),
            Value::Bool(self.auto_subscribe),
        ]
    }
}
