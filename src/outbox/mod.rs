//! At-least-once email delivery: the outbox
//!
//! [`QueuedEmail`] is a table record that additionally carries delivery
//! attempt state; [`RetryPolicy`] supplies the attempt cap and the
//! (caller-injected, monotone) backoff curve; [`OutboxWorker`] drains due
//! items sequentially through a [`MailTransport`]. An item leaves the
//! queue only on confirmed delivery or operator purge — dead-lettered
//! items stay visible, never silently dropped.

mod errors;
mod message;
mod retry;
mod transport;
mod worker;

pub use errors::{TransportError, TransportResult};
pub use message::QueuedEmail;
pub use retry::RetryPolicy;
pub use transport::{LogMailTransport, MailTransport, MockMailTransport, SmtpMailTransport};
pub use worker::{DrainReport, OutboxWorker};
