//! Skyvault CLI - AWS parameters, secrets and objects from the shell
//!
//! This is the main entry point for the Skyvault command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Credentials(args) => commands::credentials::run(args).await,
        Commands::Param(cmd) => commands::param::run(cmd).await,
        Commands::Secret(cmd) => commands::secret::run(cmd).await,
        Commands::S3(cmd) => commands::s3::run(cmd).await,
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
