//! # lazy-result
//!
//! Entry point for the chain runner.
//!
//! ## Error Handling
//!
//! Failures of the tooling (unreadable or invalid chain files) surface as
//! `anyhow` errors with context. A chain that fails is not an error of the
//! tool: its outcome is printed and the process exits with a failure code.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lazy_result::chain::{self, Evaluation};
use lazy_result::config::load_chain;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Run {
            file,
            fallback,
            json,
        } => {
            let config = load_chain(&file)
                .with_context(|| format!("Cannot load chain from {}", file.display()))?
                .with_fallback(fallback);
            let evaluation = chain::evaluate(&config).context("Cannot build chain")?;
            print_evaluation(&evaluation, json)?;
            Ok(if evaluation.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Check { file } => {
            let config = load_chain(&file)
                .with_context(|| format!("Invalid chain file {}", file.display()))?;
            info!(steps = config.steps.len(), "Chain file is valid");
            println!("ok: {} step(s)", config.steps.len());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_evaluation(evaluation: &Evaluation, json: bool) -> Result<()> {
    if json {
        println!("{}", evaluation.to_json()?);
        return Ok(());
    }

    match (&evaluation.value, &evaluation.error) {
        (Some(value), _) => println!("{value}"),
        (None, Some(error)) if evaluation.panic => eprintln!("panic: {error}"),
        (None, Some(error)) => eprintln!("error: {error}"),
        (None, None) => {}
    }
    Ok(())
}
