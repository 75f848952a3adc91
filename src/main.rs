//! Rollbook CLI entry point
//!
//! Minimal entrypoint: parse and dispatch via cli::run, print errors to
//! stderr, exit non-zero on failure. All logic lives in the library.

use rollbook::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
