//! Parameter store commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use skyvault_aws::AwsHelper;
use skyvault_core::Error;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum ParamCommands {
    /// Print a parameter value as stored
    Get(GetArgs),

    /// Print a SecureString parameter decrypted
    Decrypt(DecryptArgs),

    /// Decrypt into protected memory and report its size
    Secure(SecureArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Parameter name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Parameter name
    pub name: String,

    /// Let the parameter store decrypt instead of calling KMS directly
    #[arg(long)]
    pub server_side: bool,
}

#[derive(Args, Debug)]
pub struct SecureArgs {
    /// Parameter name
    pub name: String,

    /// Print the decrypted value
    #[arg(long)]
    pub show: bool,
}

pub async fn run(cmd: ParamCommands) -> Result<()> {
    let helper = AwsHelper::from_env();
    match cmd {
        ParamCommands::Get(args) => get(&helper, args).await,
        ParamCommands::Decrypt(args) => decrypt(&helper, args).await,
        ParamCommands::Secure(args) => secure(&helper, args).await,
    }
}

async fn get(helper: &AwsHelper, args: GetArgs) -> Result<()> {
    let value = helper
        .get_string_from_parameter_store(&args.name)
        .await
        .with_context(|| format!("Failed to get parameter {}", args.name))?
        .ok_or_else(|| Error::not_found("parameter", &args.name))?;

    println!("{}", value);
    Ok(())
}

async fn decrypt(helper: &AwsHelper, args: DecryptArgs) -> Result<()> {
    let spinner = output::spinner("Decrypting...");
    let result = helper
        .get_string_from_parameter_store_secure_string(&args.name, args.server_side)
        .await;
    spinner.finish_and_clear();

    let value = result
        .with_context(|| format!("Failed to decrypt parameter {}", args.name))?
        .ok_or_else(|| Error::not_found("parameter", &args.name))?;

    println!("{}", value);
    Ok(())
}

async fn secure(helper: &AwsHelper, args: SecureArgs) -> Result<()> {
    let spinner = output::spinner("Decrypting...");
    let result = helper.get_secure_string_from_parameter_store(&args.name).await;
    spinner.finish_and_clear();

    let value = result
        .with_context(|| format!("Failed to decrypt parameter {}", args.name))?
        .ok_or_else(|| Error::not_found("parameter", &args.name))?;

    if args.show {
        println!("{}", value.expose());
    } else {
        output::success(&format!(
            "Parameter '{}' decrypted ({} bytes)",
            args.name,
            value.len()
        ));
        output::info("Use --show to display the value");
    }
    Ok(())
}
