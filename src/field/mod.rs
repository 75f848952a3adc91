//! Field rules: pure validators and coercers over raw table cells
//!
//! Every rule takes the field name (for error messages) and the raw cell,
//! `None` meaning the header was absent from the table. Rules either return
//! a normalized value or a [`FieldError`] naming the field and the value
//! received. They never mix a sentinel error value into the success channel.

mod errors;
mod rules;

pub use errors::{FieldError, FieldResult};
pub use rules::{
    optional_count, optional_email, optional_number, optional_string, optional_timestamp,
    require_count, require_either, require_email, require_enum, require_ordered, require_string,
    require_timestamp, truthy,
};
