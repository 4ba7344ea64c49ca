mod cli;
mod coerce;
mod error;
mod model;
mod output;
mod schema;
mod validate;

use std::{io, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    // Diagnostics go to stderr; stdout carries only the verdict.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    Cli::parse();

    if let Err(e) = cli::run(io::stdin().lock(), io::stdout().lock()) {
        tracing::debug!(error = ?e, "no verdict");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
