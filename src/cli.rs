//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lazy-result - evaluate lazy result chains
#[derive(Parser, Debug)]
#[command(name = "lazy-result")]
#[command(version)]
#[command(about = "Evaluate deferred, memoized result chains described in TOML")]
#[command(
    long_about = "lazy-result builds a chain of then/try_then/expect/catch links from a TOML file, evaluates it once and prints the outcome."
)]
pub struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "lazy_result_core=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a chain file and print its outcome
    Run {
        /// Chain file path
        file: PathBuf,

        /// Value to use when the chain fails (overrides the file)
        #[arg(short, long)]
        fallback: Option<String>,

        /// Print the outcome as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Validate a chain file without evaluating it
    Check {
        /// Chain file path
        file: PathBuf,
    },
}
