//! In-memory fakes for the backing services
//!
//! Each fake keeps its state behind an `Arc<Mutex<..>>` so the handle given
//! to the facade and the handle kept by the test observe the same data.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use skyvault_aws::{
    BlobStore, DecryptionContext, Error, KeyManagement, ParameterRecord, ParameterStore, Result,
    SecretStore, ServiceKind, ServiceProvider,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Parameter store backed by a map of records
#[derive(Clone, Default)]
pub struct FakeParameterStore {
    records: Arc<Mutex<HashMap<String, ParameterRecord>>>,
    requests: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeParameterStore {
    /// Add a plain parameter
    pub fn add_plain(&self, name: &str, value: &str, arn: &str) {
        self.records.lock().unwrap().insert(
            name.to_string(),
            ParameterRecord::new(name, value, arn, false),
        );
    }

    /// Add an encrypted parameter whose stored value is base64 ciphertext
    pub fn add_encrypted(&self, name: &str, ciphertext: &[u8], arn: &str) {
        self.records.lock().unwrap().insert(
            name.to_string(),
            ParameterRecord::new(name, STANDARD.encode(ciphertext), arn, true),
        );
    }

    /// Get all recorded (name, with_decryption) requests
    pub fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParameterStore for FakeParameterStore {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<ParameterRecord>> {
        self.requests
            .lock()
            .unwrap()
            .push((name.to_string(), with_decryption));
        Ok(self.records.lock().unwrap().get(name).cloned())
    }
}

/// Key management that only decrypts ciphertext under its registered binding
#[derive(Clone, Default)]
pub struct RecordingKms {
    keys: Arc<Mutex<HashMap<Vec<u8>, (String, Vec<u8>)>>>,
    calls: Arc<Mutex<Vec<DecryptionContext>>>,
}

impl RecordingKms {
    /// Register ciphertext, the ARN it was encrypted under, and its plaintext
    pub fn register(&self, ciphertext: &[u8], arn: &str, plaintext: &[u8]) {
        self.keys
            .lock()
            .unwrap()
            .insert(ciphertext.to_vec(), (arn.to_string(), plaintext.to_vec()));
    }

    /// Get all recorded decrypt inputs
    pub fn calls(&self) -> Vec<DecryptionContext> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyManagement for RecordingKms {
    async fn decrypt(&self, context: DecryptionContext) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(context.clone());

        let keys = self.keys.lock().unwrap();
        let (arn, plaintext) = keys
            .get(&context.ciphertext)
            .ok_or_else(|| Error::decryption("InvalidCiphertextException"))?;

        if context.parameter_arn() != Some(arn.as_str()) {
            return Err(Error::decryption(
                "InvalidCiphertextException: encryption context mismatch",
            ));
        }
        Ok(plaintext.clone())
    }
}

/// Secret store backed by a map of raw payloads
#[derive(Clone, Default)]
pub struct FakeSecretStore {
    secrets: Arc<Mutex<HashMap<String, String>>>,
}

impl FakeSecretStore {
    pub fn add_secret(&self, name: &str, payload: &str) {
        self.secrets
            .lock()
            .unwrap()
            .insert(name.to_string(), payload.to_string());
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get_secret_string(&self, name: &str) -> Result<Option<String>> {
        Ok(self.secrets.lock().unwrap().get(name).cloned())
    }
}

/// Stored object with its content type
#[derive(Clone, Debug)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Object storage held in memory
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    objects: Arc<Mutex<HashMap<(String, String), StoredObject>>>,
}

impl InMemoryBlobStore {
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.object(bucket, key)
            .map(|o| o.body)
            .ok_or_else(|| Error::backing_service("s3", format!("NoSuchKey: s3://{}/{}", bucket, key)))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        Ok(format!(
            "https://{}.s3.ap-southeast-1.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}

/// Service provider over the fakes, recording every construction
#[derive(Clone, Default)]
pub struct FakeServices {
    pub parameters: FakeParameterStore,
    pub kms: RecordingKms,
    pub secrets: FakeSecretStore,
    pub blobs: InMemoryBlobStore,
    constructed: Arc<Mutex<Vec<ServiceKind>>>,
}

impl FakeServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get invocation count for a service kind
    pub fn construction_count(&self, kind: ServiceKind) -> usize {
        self.constructed
            .lock()
            .unwrap()
            .iter()
            .filter(|k| **k == kind)
            .count()
    }

    fn record(&self, kind: ServiceKind) {
        self.constructed.lock().unwrap().push(kind);
    }
}

#[async_trait]
impl ServiceProvider for FakeServices {
    async fn parameter_store(&self) -> Result<Box<dyn ParameterStore>> {
        self.record(ServiceKind::ParameterStore);
        Ok(Box::new(self.parameters.clone()))
    }

    async fn key_management(&self) -> Result<Box<dyn KeyManagement>> {
        self.record(ServiceKind::KeyManagement);
        Ok(Box::new(self.kms.clone()))
    }

    async fn secret_store(&self) -> Result<Box<dyn SecretStore>> {
        self.record(ServiceKind::SecretStore);
        Ok(Box::new(self.secrets.clone()))
    }

    async fn blob_store(&self) -> Result<Box<dyn BlobStore>> {
        self.record(ServiceKind::BlobStore);
        Ok(Box::new(self.blobs.clone()))
    }
}

/// Provider whose credential resolution always fails
pub struct FailingCredentials;

#[async_trait]
impl ServiceProvider for FailingCredentials {
    async fn parameter_store(&self) -> Result<Box<dyn ParameterStore>> {
        Err(Error::credential_resolution("static-keys", "AWS_ACCESS_KEY_ID is not set"))
    }

    async fn key_management(&self) -> Result<Box<dyn KeyManagement>> {
        Err(Error::credential_resolution("static-keys", "AWS_ACCESS_KEY_ID is not set"))
    }

    async fn secret_store(&self) -> Result<Box<dyn SecretStore>> {
        Err(Error::credential_resolution("static-keys", "AWS_ACCESS_KEY_ID is not set"))
    }

    async fn blob_store(&self) -> Result<Box<dyn BlobStore>> {
        Err(Error::credential_resolution("static-keys", "AWS_ACCESS_KEY_ID is not set"))
    }
}
