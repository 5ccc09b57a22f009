//! AWS access for Skyvault
//!
//! This crate provides:
//! - **Credential resolution**: explicit profile, web-identity federation,
//!   static keys or the ambient default chain, selected in that order
//! - **Scoped clients**: one generic builder for S3, KMS, Secrets Manager and SSM
//! - **Secure parameters**: SSM ciphertext decrypted through KMS with the
//!   parameter ARN bound as encryption context
//! - **Secrets and objects**: flat JSON secret bundles, S3 get/put and
//!   presigned download links
//!
//! ## Usage
//!
//! ```ignore
//! use skyvault_aws::AwsHelper;
//!
//! let helper = AwsHelper::from_env();
//! let password = helper
//!     .get_secure_string_from_parameter_store("/app/db/password")
//!     .await?;
//! ```

/// Debug-level tracing gated by `AWS_VERBOSE_DEBUG`
macro_rules! verbose {
    ($settings:expr, $($arg:tt)+) => {
        if $settings.verbose_debug {
            tracing::debug!($($arg)+);
        }
    };
}

pub mod blob;
pub mod clients;
pub mod credentials;
pub mod helper;
pub mod parameters;
pub mod secrets;
pub mod security;
pub mod services;
pub mod types;

pub use clients::{ClientFactory, ScopedClient, ServiceKind};
pub use credentials::{
    AwsCredentialSource, CredentialResolver, CredentialSource, CredentialStrategy,
    ResolvedCredential,
};
pub use helper::AwsHelper;
pub use security::SecureString;
pub use services::{
    BlobStore, KeyManagement, ParameterStore, SdkServiceProvider, SecretStore, ServiceProvider,
};
pub use skyvault_core::{AwsSettings, EnvConfig, Error, Result};
pub use types::{DecryptionContext, ParameterRecord, SecretBundle, PARAMETER_ARN};
