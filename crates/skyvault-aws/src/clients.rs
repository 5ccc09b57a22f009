//! Scoped AWS client construction
//!
//! One generic builder replaces a constructor per service: it resolves
//! credentials, pins the region and hands the resulting `SdkConfig` to the
//! requested client type. SDK-level retries are disabled; callers own the
//! retry policy.

use crate::credentials::CredentialResolver;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use skyvault_core::{AwsSettings, EnvConfig, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Backing services the facade talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    BlobStore,
    KeyManagement,
    SecretStore,
    ParameterStore,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::BlobStore => write!(f, "s3"),
            ServiceKind::KeyManagement => write!(f, "kms"),
            ServiceKind::SecretStore => write!(f, "secretsmanager"),
            ServiceKind::ParameterStore => write!(f, "ssm"),
        }
    }
}

/// An SDK client the factory can build
pub trait ScopedClient: Sized {
    const KIND: ServiceKind;

    fn from_sdk_config(config: &SdkConfig) -> Self;
}

impl ScopedClient for aws_sdk_s3::Client {
    const KIND: ServiceKind = ServiceKind::BlobStore;

    fn from_sdk_config(config: &SdkConfig) -> Self {
        // Emulators behind an endpoint override rarely resolve bucket subdomains
        let conf = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(config.endpoint_url().is_some())
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }
}

impl ScopedClient for aws_sdk_kms::Client {
    const KIND: ServiceKind = ServiceKind::KeyManagement;

    fn from_sdk_config(config: &SdkConfig) -> Self {
        aws_sdk_kms::Client::new(config)
    }
}

impl ScopedClient for aws_sdk_secretsmanager::Client {
    const KIND: ServiceKind = ServiceKind::SecretStore;

    fn from_sdk_config(config: &SdkConfig) -> Self {
        aws_sdk_secretsmanager::Client::new(config)
    }
}

impl ScopedClient for aws_sdk_ssm::Client {
    const KIND: ServiceKind = ServiceKind::ParameterStore;

    fn from_sdk_config(config: &SdkConfig) -> Self {
        aws_sdk_ssm::Client::new(config)
    }
}

/// Builds per-call clients from resolved credentials
#[derive(Debug)]
pub struct ClientFactory {
    settings: Arc<AwsSettings>,
    resolver: CredentialResolver,
}

impl ClientFactory {
    pub fn new(settings: Arc<AwsSettings>, resolver: CredentialResolver) -> Self {
        Self { settings, resolver }
    }

    /// Factory using the real credential sources
    pub fn from_settings(settings: Arc<AwsSettings>, env: EnvConfig) -> Self {
        let resolver = CredentialResolver::from_settings(&settings, env);
        Self::new(settings, resolver)
    }

    /// Load an `SdkConfig` for one client construction
    ///
    /// Credential errors propagate unchanged; there is no fallback to the
    /// ambient chain once an explicit strategy is selected.
    pub async fn sdk_config(&self) -> Result<SdkConfig> {
        let credential = self.resolver.resolve().await?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.settings.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &self.settings.endpoint_url {
            debug!("Using custom AWS endpoint: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        if let Some(credential) = credential {
            loader = loader.credentials_provider(credential.into_credentials());
        }

        Ok(loader.load().await)
    }

    /// Build a client of type `C`
    pub async fn build<C: ScopedClient>(&self) -> Result<C> {
        let config = self.sdk_config().await?;
        verbose!(
            self.settings,
            "Built {} client ({}) in {}",
            C::KIND,
            self.resolver.strategy(),
            self.settings.region
        );
        debug!("Constructed {} client", C::KIND);
        Ok(C::from_sdk_config(&config))
    }
}
