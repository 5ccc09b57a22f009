//! KMS decrypt backend

use super::KeyManagement;
use crate::types::DecryptionContext;
use async_trait::async_trait;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::operation::decrypt::DecryptError;
use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::Client;
use skyvault_core::{Error, Result};
use tracing::debug;

/// Key management operations over a KMS client
pub struct KmsKeyManagement {
    client: Client,
}

impl KmsKeyManagement {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for KmsKeyManagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KmsKeyManagement").finish_non_exhaustive()
    }
}

/// Classify a failed decrypt
///
/// Only a rejected ciphertext, key or binding context is a decryption
/// failure. Throttling, outages, access errors and transport failures are
/// backing-service errors.
pub(crate) fn decrypt_failure(err: &DecryptError, detail: String) -> Error {
    if err.is_invalid_ciphertext_exception()
        || err.is_incorrect_key_exception()
        || err.is_invalid_key_usage_exception()
    {
        Error::decryption(detail)
    } else {
        Error::backing_service("kms", detail)
    }
}

#[async_trait]
impl KeyManagement for KmsKeyManagement {
    async fn decrypt(&self, context: DecryptionContext) -> Result<Vec<u8>> {
        debug!(
            "Decrypting {} bytes with binding context keys {:?}",
            context.ciphertext.len(),
            context.binding_context.keys().collect::<Vec<_>>()
        );

        let resp = self
            .client
            .decrypt()
            .set_key_id(context.key_id.clone())
            .ciphertext_blob(Blob::new(context.ciphertext.clone()))
            .set_encryption_context(Some(context.binding_context.clone()))
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                decrypt_failure(&e.into_service_error(), detail)
            })?;

        resp.plaintext
            .map(Blob::into_inner)
            .ok_or_else(|| Error::decryption("KMS returned no plaintext"))
    }
}
