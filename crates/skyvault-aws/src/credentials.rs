//! Credential strategy selection and resolution
//!
//! Strategy precedence (first match wins, never combined):
//! 1. Explicit profile (`AWS_PROFILE_NAME`)
//! 2. Web-identity federation (`AWS_EKS_SA`)
//! 3. Static keys (`AWS_BASIC_AUTH`)
//! 4. Ambient default chain
//!
//! Resolution runs once per client construction. The optional cache only
//! changes that when `AWS_CREDENTIAL_CACHE` is enabled.

use async_trait::async_trait;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use aws_sdk_sts::config::retry::RetryConfig;
use aws_sdk_sts::config::{BehaviorVersion, Region};
use aws_sdk_sts::error::DisplayErrorContext;
use skyvault_core::{AwsSettings, EnvConfig, Error, Result};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tracing::{debug, info};
use zeroize::Zeroizing;

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_WEB_IDENTITY_TOKEN_FILE: &str = "AWS_WEB_IDENTITY_TOKEN_FILE";
pub const AWS_ROLE_ARN: &str = "AWS_ROLE_ARN";
pub const AWS_ROLE_SESSION_NAME: &str = "AWS_ROLE_SESSION_NAME";

/// Lifetime requested for web-identity session credentials
pub const WEB_IDENTITY_SESSION_SECONDS: i32 = 900;

const DEFAULT_SESSION_NAME: &str = "skyvault";

/// Cached credentials are refreshed this long before they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// How credentials are obtained for this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStrategy {
    /// Named profile from the shared config/credentials files
    ExplicitProfile(String),
    /// Workload identity token exchanged through STS
    WebIdentityFederation,
    /// Access/secret key pair from the environment
    StaticKeys,
    /// No override; the SDK's default chain applies
    AmbientDefault,
}

impl CredentialStrategy {
    /// Select the strategy for the given settings
    pub fn select(settings: &AwsSettings) -> Self {
        match settings.profile_name.as_deref() {
            Some(name) if !name.is_empty() => Self::ExplicitProfile(name.to_string()),
            _ if settings.web_identity => Self::WebIdentityFederation,
            _ if settings.static_keys => Self::StaticKeys,
            _ => Self::AmbientDefault,
        }
    }

    /// Short stable name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExplicitProfile(_) => "explicit-profile",
            Self::WebIdentityFederation => "web-identity",
            Self::StaticKeys => "static-keys",
            Self::AmbientDefault => "ambient-default",
        }
    }
}

impl fmt::Display for CredentialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitProfile(name) => write!(f, "explicit profile '{}'", name),
            Self::WebIdentityFederation => write!(f, "web identity federation"),
            Self::StaticKeys => write!(f, "static keys"),
            Self::AmbientDefault => write!(f, "ambient default chain"),
        }
    }
}

/// Credentials produced by one strategy
#[derive(Clone)]
pub struct ResolvedCredential {
    credentials: Credentials,
    strategy: CredentialStrategy,
}

impl ResolvedCredential {
    pub fn new(credentials: Credentials, strategy: CredentialStrategy) -> Self {
        Self {
            credentials,
            strategy,
        }
    }

    pub fn access_key_id(&self) -> &str {
        self.credentials.access_key_id()
    }

    pub fn secret_access_key(&self) -> &str {
        self.credentials.secret_access_key()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.credentials.session_token()
    }

    pub fn expiry(&self) -> Option<SystemTime> {
        self.credentials.expiry()
    }

    pub fn strategy(&self) -> &CredentialStrategy {
        &self.strategy
    }

    /// Whether the credential is still usable `margin` from `now`
    pub fn is_fresh(&self, now: SystemTime, margin: Duration) -> bool {
        match self.expiry() {
            Some(expiry) => expiry > now + margin,
            None => true,
        }
    }

    /// Unwrap into SDK credentials for client construction
    pub fn into_credentials(self) -> Credentials {
        self.credentials
    }
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("strategy", &self.strategy)
            .field("access_key_id", &mask_access_key(self.access_key_id()))
            .field("session_token", &self.session_token().map(|_| "[REDACTED]"))
            .field("expiry", &self.expiry())
            .finish_non_exhaustive()
    }
}

/// Show only the last four characters of an access key id
///
/// Keys of four characters or fewer are masked completely.
pub fn mask_access_key(access_key_id: &str) -> String {
    let len = access_key_id.chars().count();
    if len <= 4 {
        return "****".to_string();
    }
    let visible: String = access_key_id.chars().skip(len - 4).collect();
    format!("****{}", visible)
}

/// Build a static credential from an access/secret key pair
///
/// Fails when either half is absent or empty.
pub fn static_credentials(
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
) -> Result<ResolvedCredential> {
    let strategy = CredentialStrategy::StaticKeys;
    let access_key_id = access_key_id.filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::credential_resolution(strategy.name(), format!("{} is not set", AWS_ACCESS_KEY_ID))
    })?;
    let secret_access_key = Zeroizing::new(secret_access_key.filter(|v| !v.is_empty()).ok_or_else(
        || {
            Error::credential_resolution(
                strategy.name(),
                format!("{} is not set", AWS_SECRET_ACCESS_KEY),
            )
        },
    )?);

    let credentials = Credentials::new(
        access_key_id,
        secret_access_key.as_str(),
        None,
        None,
        "SkyvaultStaticKeys",
    );
    Ok(ResolvedCredential::new(credentials, strategy))
}

/// Where each explicit strategy gets its credentials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Credentials of a named local profile
    async fn profile(&self, name: &str) -> Result<ResolvedCredential>;

    /// Session credentials from a web-identity token exchange
    async fn web_identity(&self) -> Result<ResolvedCredential>;

    /// Access/secret key pair from the environment
    fn static_keys(&self) -> Result<ResolvedCredential>;
}

/// Credential source backed by the shared profile files, STS and the environment
#[derive(Debug, Clone)]
pub struct AwsCredentialSource {
    env: EnvConfig,
    region: String,
    /// STS endpoint override, shared with the service clients
    endpoint_url: Option<String>,
    verbose_debug: bool,
}

impl AwsCredentialSource {
    pub fn new(env: EnvConfig, settings: &AwsSettings) -> Self {
        Self {
            env,
            region: settings.region.clone(),
            endpoint_url: settings.endpoint_url.clone(),
            verbose_debug: settings.verbose_debug,
        }
    }

    /// Unsigned STS client for the token exchange
    fn sts_client(&self) -> aws_sdk_sts::Client {
        let mut builder = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .retry_config(RetryConfig::disabled());
        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        aws_sdk_sts::Client::from_conf(builder.build())
    }

    fn required(&self, key: &str, strategy: &CredentialStrategy) -> Result<String> {
        self.env
            .get_string(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::credential_resolution(strategy.name(), format!("{} is not set", key))
            })
    }
}

#[async_trait]
impl CredentialSource for AwsCredentialSource {
    async fn profile(&self, name: &str) -> Result<ResolvedCredential> {
        let strategy = CredentialStrategy::ExplicitProfile(name.to_string());
        let provider = ProfileFileCredentialsProvider::builder()
            .profile_name(name)
            .build();

        let credentials = provider.provide_credentials().await.map_err(|e| {
            Error::credential_resolution(
                strategy.name(),
                format!("profile '{}': {}", name, DisplayErrorContext(&e)),
            )
        })?;

        debug!("Loaded credentials for profile {}", name);
        Ok(ResolvedCredential::new(credentials, strategy))
    }

    async fn web_identity(&self) -> Result<ResolvedCredential> {
        let strategy = CredentialStrategy::WebIdentityFederation;
        let token_file = self.required(AWS_WEB_IDENTITY_TOKEN_FILE, &strategy)?;
        let role_arn = self.required(AWS_ROLE_ARN, &strategy)?;
        let session_name = self
            .env
            .get_string_or(AWS_ROLE_SESSION_NAME, DEFAULT_SESSION_NAME);

        verbose!(self, "Reading web identity token from {}", token_file);
        let token = Zeroizing::new(tokio::fs::read_to_string(&token_file).await.map_err(|e| {
            Error::credential_resolution(
                strategy.name(),
                format!("failed to read token file {}: {}", token_file, e),
            )
        })?);

        // AssumeRoleWithWebIdentity is an unsigned call, so no credentials provider
        let client = self.sts_client();

        verbose!(self, "Exchanging web identity token for role {}", role_arn);
        let resp = client
            .assume_role_with_web_identity()
            .role_arn(&role_arn)
            .role_session_name(session_name)
            .web_identity_token(token.trim())
            .duration_seconds(WEB_IDENTITY_SESSION_SECONDS)
            .send()
            .await
            .map_err(|e| {
                Error::credential_resolution(
                    strategy.name(),
                    format!("STS exchange failed: {}", DisplayErrorContext(&e)),
                )
            })?;

        let session = resp.credentials.ok_or_else(|| {
            Error::credential_resolution(strategy.name(), "STS returned no credentials")
        })?;
        let expiry = SystemTime::try_from(session.expiration).ok();

        verbose!(self, "Obtained STS session credentials for role {}", role_arn);
        let credentials = Credentials::new(
            session.access_key_id,
            session.secret_access_key,
            Some(session.session_token),
            expiry,
            "SkyvaultWebIdentity",
        );
        Ok(ResolvedCredential::new(credentials, strategy))
    }

    fn static_keys(&self) -> Result<ResolvedCredential> {
        static_credentials(
            self.env.get_string(AWS_ACCESS_KEY_ID),
            self.env.get_string(AWS_SECRET_ACCESS_KEY),
        )
    }
}

/// Decides the strategy once and resolves it on demand
pub struct CredentialResolver {
    strategy: CredentialStrategy,
    source: Arc<dyn CredentialSource>,
    /// Present only when caching is enabled
    cache: Option<RwLock<Option<ResolvedCredential>>>,
    verbose_debug: bool,
}

impl CredentialResolver {
    /// Create a resolver for the given settings and source
    pub fn new(settings: &AwsSettings, source: Arc<dyn CredentialSource>) -> Self {
        let strategy = CredentialStrategy::select(settings);
        info!("Using AWS credential strategy: {}", strategy);

        Self {
            strategy,
            source,
            cache: settings.credential_cache.then(|| RwLock::new(None)),
            verbose_debug: settings.verbose_debug,
        }
    }

    /// Create a resolver backed by the real profile files, STS and environment
    pub fn from_settings(settings: &AwsSettings, env: EnvConfig) -> Self {
        let source = AwsCredentialSource::new(env, settings);
        Self::new(settings, Arc::new(source))
    }

    pub fn strategy(&self) -> &CredentialStrategy {
        &self.strategy
    }

    /// Resolve credentials for one client construction
    ///
    /// `Ok(None)` means the ambient default chain should be used.
    pub async fn resolve(&self) -> Result<Option<ResolvedCredential>> {
        if self.strategy == CredentialStrategy::AmbientDefault {
            verbose!(self, "No explicit credentials, using ambient default chain");
            return Ok(None);
        }

        if let Some(cache) = &self.cache {
            let cached = cache.read().await;
            if let Some(credential) = cached.as_ref() {
                if credential.is_fresh(SystemTime::now(), EXPIRY_MARGIN) {
                    verbose!(self, "Using cached {} credentials", self.strategy.name());
                    return Ok(Some(credential.clone()));
                }
            }
        }

        let credential = self.resolve_uncached().await?;

        if let Some(cache) = &self.cache {
            let mut cached = cache.write().await;
            *cached = Some(credential.clone());
        }

        Ok(Some(credential))
    }

    async fn resolve_uncached(&self) -> Result<ResolvedCredential> {
        match &self.strategy {
            CredentialStrategy::ExplicitProfile(name) => {
                verbose!(self, "Getting credentials for profile {}", name);
                self.source.profile(name).await
            }
            CredentialStrategy::WebIdentityFederation => {
                verbose!(self, "Getting web identity credentials");
                self.source.web_identity().await
            }
            CredentialStrategy::StaticKeys => {
                verbose!(self, "Getting static key credentials");
                self.source.static_keys()
            }
            CredentialStrategy::AmbientDefault => Err(Error::credential_resolution(
                self.strategy.name(),
                "ambient default has no explicit credentials",
            )),
        }
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("strategy", &self.strategy)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
