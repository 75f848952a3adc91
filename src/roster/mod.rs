//! The concrete record catalog
//!
//! One module per table the club keeps: lifecycle action templates, the
//! member bootstrap roster, election configuration and elections, public
//! mailing groups, and the append-only audit trail. Each kind implements
//! [`crate::record::TableRecord`] with its own invariants.

mod action_spec;
mod audit;
mod bootstrap;
mod election;
mod group;

pub use action_spec::{ActionSpec, ActionType};
pub use audit::AuditEntry;
pub use bootstrap::BootstrapRow;
pub use election::{Election, ElectionConfig, ElectionStatus};
pub use group::PublicGroup;
