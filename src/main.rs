//! repotally - per-author contribution analysis for git repositories
//!
//! Binary entry point: parses the command line, runs the analysis and prints
//! the reports as JSON on stdout. Logging goes to stderr and is controlled
//! by `RUST_LOG`.

mod cli;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
