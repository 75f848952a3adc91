//! rollbook - membership-roster automation for a club
//!
//! The core is the validated-record ingestion and reliable-delivery
//! framework: untyped table rows become strongly-typed, invariant-checked
//! records (`field`, `record`, `roster`); whole-table batches validate
//! with row-attributed errors and one consolidated operator alert
//! (`batch`, `alert`); and outbound notices go through an at-least-once
//! outbox with retry, backoff, and dead-lettering (`outbox`). The backing
//! table store (`store`) and the notice planner (`lifecycle`) sit at the
//! edges; `cli` is thin wiring.

pub mod alert;
pub mod batch;
pub mod cli;
pub mod field;
pub mod lifecycle;
pub mod observability;
pub mod outbox;
pub mod record;
pub mod roster;
pub mod store;
