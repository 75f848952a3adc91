//! Operator notification boundary
//!
//! The batch validator talks to an [`AlertGateway`], never to SMTP
//! directly. The mock gateway records sends and can inject failures; the
//! SMTP gateway delivers over lettre. Alerting is observability, not
//! correctness: callers catch gateway failures and degrade to a log line.

mod errors;
mod gateway;
mod smtp;

pub use errors::{AlertError, AlertResult};
pub use gateway::{Alert, AlertGateway, LogAlertGateway, MockAlertGateway, SmtpAlertGateway};
pub use smtp::SmtpConfig;
