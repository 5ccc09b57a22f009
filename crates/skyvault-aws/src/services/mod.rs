//! Backing-service seams
//!
//! Each backing service is a small trait with an SDK-backed implementation.
//! The facade only ever sees these traits, handed out per call by a
//! [`ServiceProvider`].

pub mod kms;
pub mod s3;
pub mod secrets_manager;
pub mod ssm;

use crate::clients::ClientFactory;
use crate::types::{DecryptionContext, ParameterRecord};
use async_trait::async_trait;
use skyvault_core::{AwsSettings, EnvConfig, Result};
use std::sync::Arc;
use std::time::Duration;

pub use kms::KmsKeyManagement;
pub use s3::S3BlobStore;
pub use secrets_manager::SecretsManagerStore;
pub use ssm::SsmParameterStore;

/// Name/value configuration store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch a parameter
    ///
    /// Returns Ok(None) if the parameter does not exist
    /// Returns Err for any other service or transport failure
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<ParameterRecord>>;
}

/// Server-side decryption with managed keys
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyManagement: Send + Sync {
    /// Decrypt ciphertext; binding-context or ciphertext rejection is an error
    async fn decrypt(&self, context: DecryptionContext) -> Result<Vec<u8>>;
}

/// Versioned secret-value storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Raw secret string; Ok(None) when the secret does not exist
    async fn get_secret_string(&self, name: &str) -> Result<Option<String>>;
}

/// Bucket/key-addressed object storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Time-limited download URL for an object
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String>;
}

/// Hands out a freshly constructed service handle per call
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    async fn parameter_store(&self) -> Result<Box<dyn ParameterStore>>;

    async fn key_management(&self) -> Result<Box<dyn KeyManagement>>;

    async fn secret_store(&self) -> Result<Box<dyn SecretStore>>;

    async fn blob_store(&self) -> Result<Box<dyn BlobStore>>;
}

/// Service provider backed by the AWS SDK clients
#[derive(Debug)]
pub struct SdkServiceProvider {
    factory: ClientFactory,
}

impl SdkServiceProvider {
    pub fn new(factory: ClientFactory) -> Self {
        Self { factory }
    }

    pub fn from_settings(settings: Arc<AwsSettings>, env: EnvConfig) -> Self {
        Self::new(ClientFactory::from_settings(settings, env))
    }
}

#[async_trait]
impl ServiceProvider for SdkServiceProvider {
    async fn parameter_store(&self) -> Result<Box<dyn ParameterStore>> {
        let client = self.factory.build::<aws_sdk_ssm::Client>().await?;
        Ok(Box::new(SsmParameterStore::new(client)))
    }

    async fn key_management(&self) -> Result<Box<dyn KeyManagement>> {
        let client = self.factory.build::<aws_sdk_kms::Client>().await?;
        Ok(Box::new(KmsKeyManagement::new(client)))
    }

    async fn secret_store(&self) -> Result<Box<dyn SecretStore>> {
        let client = self.factory.build::<aws_sdk_secretsmanager::Client>().await?;
        Ok(Box::new(SecretsManagerStore::new(client)))
    }

    async fn blob_store(&self) -> Result<Box<dyn BlobStore>> {
        let client = self.factory.build::<aws_sdk_s3::Client>().await?;
        Ok(Box::new(S3BlobStore::new(client)))
    }
}
