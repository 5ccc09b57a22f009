//! CLI argument parsing with clap

use clap::{Parser, Subcommand};

pub use crate::commands::credentials::CredentialsArgs;
pub use crate::commands::param::ParamCommands;
pub use crate::commands::s3::S3Commands;
pub use crate::commands::secret::SecretCommands;

/// Skyvault - AWS parameters, secrets and objects
#[derive(Parser, Debug)]
#[command(name = "skyvault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show and resolve the active credential strategy
    Credentials(CredentialsArgs),

    /// Parameter store access
    #[command(subcommand)]
    Param(ParamCommands),

    /// Secrets manager access
    #[command(subcommand)]
    Secret(SecretCommands),

    /// S3 object access
    #[command(subcommand)]
    S3(S3Commands),
}
