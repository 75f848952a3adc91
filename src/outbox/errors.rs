//! Mail transport error types

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("failed to build email: {0}")]
    BuildFailed(String),

    #[error("failed to deliver email: {0}")]
    DeliveryFailed(String),
}
