//! Table store error types
//!
//! Store unavailability is the one failure class allowed to propagate as
//! fatal: a batch without its table cannot run at all.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table '{table}' not found")]
    TableNotFound { table: String },

    #[error("failed to read table '{table}': {detail}")]
    ReadFailed { table: String, detail: String },

    #[error("table '{table}' is not valid JSON: {detail}")]
    Malformed { table: String, detail: String },

    #[error("failed to write table '{table}': {detail}")]
    WriteFailed { table: String, detail: String },
}

impl StoreError {
    pub fn not_found(table: impl Into<String>) -> Self {
        StoreError::TableNotFound {
            table: table.into(),
        }
    }

    pub fn read_failed(table: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::ReadFailed {
            table: table.into(),
            detail: detail.into(),
        }
    }

    pub fn malformed(table: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::Malformed {
            table: table.into(),
            detail: detail.into(),
        }
    }

    pub fn write_failed(table: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::WriteFailed {
            table: table.into(),
            detail: detail.into(),
        }
    }
}
