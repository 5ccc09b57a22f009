//! AWS helper facade
//!
//! `AwsHelper` owns the settings read at construction time and a
//! [`ServiceProvider`] that builds a fresh, credentialed service handle for
//! every call.

use crate::blob::{self, DEFAULT_CONTENT_TYPE};
use crate::parameters;
use crate::secrets::parse_secret_bundle;
use crate::security::SecureString;
use crate::services::{SdkServiceProvider, ServiceProvider};
use crate::types::{ParameterRecord, SecretBundle};
use skyvault_core::settings::AWS_SECRET_NAME;
use skyvault_core::{AwsSettings, EnvConfig, Error, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Entry point for parameters, secrets and objects
#[derive(Clone)]
pub struct AwsHelper {
    settings: Arc<AwsSettings>,
    services: Arc<dyn ServiceProvider>,
}

impl AwsHelper {
    /// Build from the live process environment
    pub fn from_env() -> Self {
        let env = EnvConfig::process();
        Self::new(AwsSettings::from_env(&env), env)
    }

    /// Build from explicit settings; `env` supplies the credential inputs
    pub fn new(settings: AwsSettings, env: EnvConfig) -> Self {
        let settings = Arc::new(settings);
        let services = Arc::new(SdkServiceProvider::from_settings(settings.clone(), env));
        Self { settings, services }
    }

    /// Build over an arbitrary service provider
    pub fn with_services(settings: AwsSettings, services: Arc<dyn ServiceProvider>) -> Self {
        Self {
            settings: Arc::new(settings),
            services,
        }
    }

    pub fn settings(&self) -> &AwsSettings {
        &self.settings
    }

    async fn fetch_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<ParameterRecord>> {
        verbose!(
            self.settings,
            "Fetching parameter {} (with_decryption={})",
            name,
            with_decryption
        );

        let store = self.services.parameter_store().await?;
        let record = store.get_parameter(name, with_decryption).await?;
        if record.is_none() {
            error!("Parameter {} not found in parameter store", name);
        }
        Ok(record)
    }

    /// Plain parameter value; Ok(None) when the parameter does not exist
    pub async fn get_string_from_parameter_store(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .fetch_parameter(name, false)
            .await?
            .map(|record| record.value))
    }

    /// Parameter value, decrypted server-side or through KMS
    ///
    /// With `with_decryption` the store returns plaintext directly. Without
    /// it the value is ciphertext and is decrypted here, bound to the
    /// parameter ARN.
    pub async fn get_string_from_parameter_store_secure_string(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<String>> {
        let Some(record) = self.fetch_parameter(name, with_decryption).await? else {
            return Ok(None);
        };

        if with_decryption {
            return Ok(Some(record.value));
        }

        let plaintext = self.decrypt(&record).await?;
        parameters::plaintext_to_string(plaintext).map(Some)
    }

    /// Parameter value decrypted through KMS into a [`SecureString`]
    pub async fn get_secure_string_from_parameter_store(
        &self,
        name: &str,
    ) -> Result<Option<SecureString>> {
        let Some(record) = self.fetch_parameter(name, false).await? else {
            return Ok(None);
        };

        let plaintext = self.decrypt(&record).await?;
        SecureString::from_plaintext(plaintext).map(Some)
    }

    async fn decrypt(&self, record: &ParameterRecord) -> Result<zeroize::Zeroizing<Vec<u8>>> {
        verbose!(
            self.settings,
            "Decrypting parameter {} with key {:?}",
            record.name,
            self.settings.kms_key_id
        );

        let kms = self.services.key_management().await?;
        parameters::decrypt_record(kms.as_ref(), record, self.settings.kms_key_id.as_deref()).await
    }

    /// Secret as a flat string map
    ///
    /// `name` falls back to `AWS_SECRET_NAME`. A missing secret, a service
    /// failure or a payload that is not a flat object all yield Ok(None) after
    /// an error log. Credential failures are returned.
    pub async fn get_secret_from_secrets_manager(
        &self,
        name: Option<&str>,
    ) -> Result<Option<SecretBundle>> {
        let name = name
            .filter(|n| !n.is_empty())
            .or(self.settings.secret_name.as_deref())
            .ok_or_else(|| Error::missing_config(AWS_SECRET_NAME, "no secret name given"))?;

        verbose!(self.settings, "Fetching secret {}", name);

        let store = self.services.secret_store().await?;
        let payload = match store.get_secret_string(name).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                error!("Secret {} not found in secrets manager", name);
                return Ok(None);
            }
            Err(e) => {
                error!("Failed to fetch secret {}: {}", name, e);
                return Ok(None);
            }
        };

        match parse_secret_bundle(&payload) {
            Ok(bundle) => {
                verbose!(self.settings, "Secret {} has {} entries", name, bundle.len());
                Ok(Some(bundle))
            }
            Err(e) => {
                error!("Secret {} is not a flat JSON object of strings: {}", name, e);
                Ok(None)
            }
        }
    }

    /// Download a whole object
    pub async fn get_file_from_s3(&self, key: &str, bucket: Option<&str>) -> Result<Vec<u8>> {
        let bucket = blob::resolve_bucket(bucket, self.settings.s3_bucket_name.as_deref())?;
        verbose!(self.settings, "Getting s3://{}/{}", bucket, key);

        let store = self.services.blob_store().await?;
        store.get_object(&bucket, key).await
    }

    /// Upload a whole object; content type defaults to `text/plain`
    pub async fn put_file_to_s3(
        &self,
        bytes: Vec<u8>,
        key: &str,
        content_type: Option<&str>,
        bucket: Option<&str>,
    ) -> Result<()> {
        let bucket = blob::resolve_bucket(bucket, self.settings.s3_bucket_name.as_deref())?;
        let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);
        verbose!(
            self.settings,
            "Putting {} bytes to s3://{}/{} as {}",
            bytes.len(),
            bucket,
            key,
            content_type
        );

        let store = self.services.blob_store().await?;
        match store.put_object(&bucket, key, bytes, content_type).await {
            Ok(()) => {
                info!("Uploaded s3://{}/{}", bucket, key);
                Ok(())
            }
            Err(e) => {
                if self.settings.print_stack_trace {
                    error!("Upload to s3://{}/{} failed: {:?}", bucket, key, e);
                } else {
                    error!("Upload to s3://{}/{} failed", bucket, key);
                }
                Err(e)
            }
        }
    }

    /// Time-limited download link
    ///
    /// The expiry is checked before any credential or network work.
    pub async fn generate_presigned_s3_url_download(
        &self,
        key: &str,
        expiry_mins: i64,
        bucket: Option<&str>,
    ) -> Result<String> {
        let expires_in = blob::presign_expiry(expiry_mins)?;
        let bucket = blob::resolve_bucket(bucket, self.settings.s3_bucket_name.as_deref())?;
        verbose!(
            self.settings,
            "Presigning s3://{}/{} for {} minutes",
            bucket,
            key,
            expiry_mins
        );

        let store = self.services.blob_store().await?;
        store.presign_get(&bucket, key, expires_in).await
    }
}

impl std::fmt::Debug for AwsHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsHelper")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
