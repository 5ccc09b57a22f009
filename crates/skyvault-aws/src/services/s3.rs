//! S3 backend for object storage
//!
//! Provides get/put of whole objects and presigned GET URLs.

use super::BlobStore;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use skyvault_core::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Blob store operations over an S3 client
pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        debug!("Downloading object: s3://{}/{}", bucket, key);

        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                Error::backing_service(
                    "s3",
                    format!("GetObject s3://{}/{}: {}", bucket, key, DisplayErrorContext(&e)),
                )
            })?;

        let body = resp.body.collect().await.map_err(|e| {
            Error::backing_service("s3", format!("Failed to read response body: {}", e))
        })?;

        let data = body.into_bytes().to_vec();
        debug!(
            "Downloaded {} bytes from s3://{}/{}",
            data.len(),
            bucket,
            key
        );

        Ok(data)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        debug!(
            "Uploading object ({} bytes): s3://{}/{}",
            body.len(),
            bucket,
            key
        );

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                Error::backing_service(
                    "s3",
                    format!("PutObject s3://{}/{}: {}", bucket, key, DisplayErrorContext(&e)),
                )
            })?;

        debug!("PutObject completed for s3://{}/{}", bucket, key);
        Ok(())
    }

    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| Error::validation(format!("Invalid presign expiry: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| {
                Error::backing_service(
                    "s3",
                    format!(
                        "Presign GetObject s3://{}/{}: {}",
                        bucket,
                        key,
                        DisplayErrorContext(&e)
                    ),
                )
            })?;

        debug!("Generated presigned URL for s3://{}/{}", bucket, key);
        Ok(request.uri().to_string())
    }
}
