//! Field validation error types
//!
//! Every variant names the field and, where one exists, the offending value.
//! Field errors are always recoverable: construction fails, the caller
//! decides whether to skip or report the row.

use thiserror::Error;

/// Result type for field rule and record construction operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Field validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be one of [{allowed}], got '{value}'")]
    NotInSet {
        field: String,
        allowed: String,
        value: String,
    },

    #[error("{field} must be a number, got '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("{field} must be a non-negative integer, got '{value}'")]
    NotACount { field: String, value: String },

    #[error("{field} must be a date or timestamp, got '{value}'")]
    NotATimestamp { field: String, value: String },

    #[error("{end_field} must not be before {start_field}")]
    OutOfOrder {
        start_field: String,
        end_field: String,
    },

    #[error("at least one of {field_a} or {field_b} is required")]
    NeitherPresent { field_a: String, field_b: String },

    #[error("{field} must be an email address, got '{value}'")]
    NotAnAddress { field: String, value: String },
}

impl FieldError {
    pub fn required(field: impl Into<String>) -> Self {
        FieldError::Required {
            field: field.into(),
        }
    }

    pub fn not_in_set(field: impl Into<String>, allowed: &[&str], value: impl Into<String>) -> Self {
        FieldError::NotInSet {
            field: field.into(),
            allowed: allowed.join(", "),
            value: value.into(),
        }
    }

    pub fn not_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldError::NotNumeric {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_a_count(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldError::NotACount {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_a_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldError::NotATimestamp {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn out_of_order(start_field: impl Into<String>, end_field: impl Into<String>) -> Self {
        FieldError::OutOfOrder {
            start_field: start_field.into(),
            end_field: end_field.into(),
        }
    }

    pub fn neither_present(field_a: impl Into<String>, field_b: impl Into<String>) -> Self {
        FieldError::NeitherPresent {
            field_a: field_a.into(),
            field_b: field_b.into(),
        }
    }

    pub fn not_an_address(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldError::NotAnAddress {
            field: field.into(),
            value: value.into(),
        }
    }
}
