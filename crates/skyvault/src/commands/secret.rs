//! Secrets manager commands

use anyhow::Result;
use clap::{Args, Subcommand};
use skyvault_aws::{AwsHelper, SecretBundle};
use skyvault_core::Error;
use std::collections::BTreeMap;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum SecretCommands {
    /// Fetch a secret stored as a flat JSON object
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Secret name (defaults to AWS_SECRET_NAME)
    pub name: Option<String>,

    /// Print only this entry
    #[arg(long)]
    pub key: Option<String>,

    /// Show values instead of masking them
    #[arg(long)]
    pub show: bool,
}

pub async fn run(cmd: SecretCommands) -> Result<()> {
    match cmd {
        SecretCommands::Get(args) => get(args).await,
    }
}

async fn get(args: GetArgs) -> Result<()> {
    let helper = AwsHelper::from_env();
    let display_name = args
        .name
        .clone()
        .or_else(|| helper.settings().secret_name.clone())
        .unwrap_or_default();

    let bundle = helper
        .get_secret_from_secrets_manager(args.name.as_deref())
        .await?
        .ok_or_else(|| Error::not_found("secret", &display_name))?;

    match &args.key {
        Some(key) => {
            let value = bundle
                .get(key)
                .ok_or_else(|| Error::not_found("secret entry", format!("{}.{}", display_name, key)))?;
            if args.show {
                println!("{}", value);
            } else {
                println!("{}", output::mask(value));
                output::info("Use --show to display the value");
            }
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&render(&bundle, args.show))?);
            if bundle.is_empty() {
                output::warning(&format!("Secret '{}' has no entries", display_name));
            }
        }
    }
    Ok(())
}

/// Sorted view of a bundle, masked unless `show`
fn render(bundle: &SecretBundle, show: bool) -> BTreeMap<&str, String> {
    bundle
        .iter()
        .map(|(k, v)| {
            let value = if show { v.clone() } else { output::mask(v) };
            (k.as_str(), value)
        })
        .collect()
}
