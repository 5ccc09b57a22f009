//! Credential strategy inspection

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use skyvault_aws::credentials::mask_access_key;
use skyvault_aws::{AwsSettings, CredentialResolver, EnvConfig};
use std::time::UNIX_EPOCH;

use crate::output;

#[derive(Args, Debug)]
pub struct CredentialsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// What the active strategy resolved to, without secret material
#[derive(Debug, Serialize)]
struct CredentialReport {
    strategy: String,
    region: String,
    /// Absent when the ambient default chain is used
    access_key_id: Option<String>,
    session_token: bool,
    /// Seconds since the Unix epoch
    expires_at: Option<u64>,
}

pub async fn run(args: CredentialsArgs) -> Result<()> {
    let env = EnvConfig::process();
    let settings = AwsSettings::from_env(&env);
    let resolver = CredentialResolver::from_settings(&settings, env);

    let resolved = resolver
        .resolve()
        .await
        .with_context(|| format!("Failed to resolve {} credentials", resolver.strategy()))?;

    let report = CredentialReport {
        strategy: resolver.strategy().name().to_string(),
        region: settings.region.clone(),
        access_key_id: resolved.as_ref().map(|c| mask_access_key(c.access_key_id())),
        session_token: resolved
            .as_ref()
            .is_some_and(|c| c.session_token().is_some()),
        expires_at: resolved
            .as_ref()
            .and_then(|c| c.expiry())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header("AWS Credentials");
    output::kv("Strategy", &resolver.strategy().to_string());
    output::kv("Region", &report.region);
    match &report.access_key_id {
        Some(key) => {
            output::kv("Access key", key);
            output::kv(
                "Session token",
                &if report.session_token {
                    "yes".green().to_string()
                } else {
                    "no".dimmed().to_string()
                },
            );
            if let Some(expires_at) = report.expires_at {
                output::kv("Expires at (epoch)", &expires_at.to_string());
            }
            output::success("Credentials resolved");
        }
        None => {
            output::info("No explicit credentials; the SDK default chain will be used");
        }
    }

    Ok(())
}
