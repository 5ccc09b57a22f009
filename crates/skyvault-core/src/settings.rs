//! Process-wide AWS settings
//!
//! Read once from the environment when the facade is constructed and never
//! mutated afterwards.

use crate::env::EnvConfig;

/// Region every client is bound to unless `AWS_REGION` overrides it
pub const DEFAULT_REGION: &str = "ap-southeast-1";

pub const KMS_KEY_ID: &str = "KMS_KEY_ID";
pub const AWS_PROFILE_NAME: &str = "AWS_PROFILE_NAME";
pub const S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
pub const AWS_SECRET_NAME: &str = "AWS_SECRET_NAME";
pub const AWS_EKS_SA: &str = "AWS_EKS_SA";
pub const AWS_BASIC_AUTH: &str = "AWS_BASIC_AUTH";
pub const AWS_VERBOSE_DEBUG: &str = "AWS_VERBOSE_DEBUG";
pub const AWS_PRINT_STACK_TRACE: &str = "AWS_PRINT_STACK_TRACE";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_CREDENTIAL_CACHE: &str = "AWS_CREDENTIAL_CACHE";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

/// Configuration captured at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// KMS key used for every decrypt call
    pub kms_key_id: Option<String>,
    /// Named profile; forces the explicit-profile strategy when set
    pub profile_name: Option<String>,
    /// Default bucket for blob operations
    pub s3_bucket_name: Option<String>,
    /// Default secret for the no-argument secret fetch
    pub secret_name: Option<String>,
    /// Web-identity (pod service account) federation
    pub web_identity: bool,
    /// Static access/secret key pair from the environment
    pub static_keys: bool,
    /// Emit high-volume step tracing
    pub verbose_debug: bool,
    /// Include the full error chain when an upload fails
    pub print_stack_trace: bool,
    pub region: String,
    /// Reuse resolved credentials until they approach expiry
    pub credential_cache: bool,
    /// Endpoint override for every client, STS included (local emulators)
    pub endpoint_url: Option<String>,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            kms_key_id: None,
            profile_name: None,
            s3_bucket_name: None,
            secret_name: None,
            web_identity: false,
            static_keys: false,
            verbose_debug: false,
            print_stack_trace: false,
            region: DEFAULT_REGION.to_string(),
            credential_cache: false,
            endpoint_url: None,
        }
    }
}

impl AwsSettings {
    /// Read settings from the given environment
    pub fn from_env(env: &EnvConfig) -> Self {
        let non_empty = |key: &str| env.get_string(key).filter(|v| !v.is_empty());

        let settings = Self {
            kms_key_id: non_empty(KMS_KEY_ID),
            profile_name: non_empty(AWS_PROFILE_NAME),
            s3_bucket_name: non_empty(S3_BUCKET_NAME),
            secret_name: non_empty(AWS_SECRET_NAME),
            web_identity: env.get_bool_or(AWS_EKS_SA, false),
            static_keys: env.get_bool_or(AWS_BASIC_AUTH, false),
            verbose_debug: env.get_bool_or(AWS_VERBOSE_DEBUG, false),
            print_stack_trace: env.get_bool_or(AWS_PRINT_STACK_TRACE, false),
            region: env.get_string_or(AWS_REGION, DEFAULT_REGION),
            credential_cache: env.get_bool_or(AWS_CREDENTIAL_CACHE, false),
            endpoint_url: non_empty(AWS_ENDPOINT_URL),
        };

        tracing::debug!(
            region = %settings.region,
            profile = ?settings.profile_name,
            web_identity = settings.web_identity,
            static_keys = settings.static_keys,
            endpoint = ?settings.endpoint_url,
            "Loaded AWS settings"
        );

        settings
    }
}
