//! CLI argument definitions using clap
//!
//! Commands:
//! - rollbook init --config <path>
//! - rollbook validate --config <path> --kind <kind> [--table <name>]
//! - rollbook plan --config <path> [--date YYYY-MM-DD]
//! - rollbook drain --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rollbook - membership-roster automation for a club
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file and seed the table files
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./rollbook.json")]
        config: PathBuf,
    },

    /// Validate one table and report (and alert on) bad rows
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./rollbook.json")]
        config: PathBuf,

        /// Record kind: actions, members, election-config, elections,
        /// groups, audit, or queue
        #[arg(long)]
        kind: String,

        /// Table name, when it differs from the kind's default table
        #[arg(long)]
        table: Option<String>,
    },

    /// Queue the membership notices due on a date
    Plan {
        /// Path to configuration file
        #[arg(long, default_value = "./rollbook.json")]
        config: PathBuf,

        /// Date to plan for, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Attempt delivery of every due item in the queue
    Drain {
        /// Path to configuration file
        #[arg(long, default_value = "./rollbook.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
