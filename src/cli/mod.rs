//! CLI module for rollbook
//!
//! Provides the command-line interface:
//! - init: write a default config and seed the table files
//! - validate: batch-validate one table
//! - plan: queue the notices due on a date
//! - drain: attempt delivery of the queued notices

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{drain, init, plan, run, validate};
pub use config::{Config, SmtpSettings};
pub use errors::{CliError, CliResult};
