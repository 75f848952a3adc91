//! CLI-specific error types
//!
//! Everything here is fatal to the invoked command: a missing config, an
//! unreachable table store, an unparseable date. Row-level validation
//! failures are NOT CLI errors — they are reported and alerted on while
//! the command carries on with the rows that passed.

use thiserror::Error;

use crate::field::FieldError;
use crate::store::StoreError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown record kind '{0}' (expected actions, members, election-config, elections, groups, audit, or queue)")]
    UnknownKind(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    BadDate(String),

    #[error("failed to queue notice: {0}")]
    Plan(#[from] FieldError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }
}
