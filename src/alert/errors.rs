//! Alert delivery error types

use thiserror::Error;

pub type AlertResult<T> = Result<T, AlertError>;

#[derive(Debug, Clone, Error)]
pub enum AlertError {
    #[error("failed to build alert message: {0}")]
    BuildFailed(String),

    #[error("failed to send alert: {0}")]
    SendFailed(String),
}
