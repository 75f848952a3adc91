//! Observability subsystem for rollbook
//!
//! Structured JSON logging only. Logging is synchronous, deterministic in
//! key order, and must never change the outcome of the operation being
//! logged: a batch that validates with logging off validates identically
//! with logging on.

mod logger;

pub use logger::{Level, Logger};
