//! Secrets Manager backend

use super::SecretStore;
use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use skyvault_core::{Error, Result};
use tracing::debug;

/// Secret store operations over a Secrets Manager client
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SecretsManagerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsManagerStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn get_secret_string(&self, name: &str) -> Result<Option<String>> {
        debug!("Getting secret value: {}", name);

        match self.client.get_secret_value().secret_id(name).send().await {
            Ok(resp) => match (resp.secret_string, resp.secret_binary) {
                (Some(payload), _) => Ok(Some(payload)),
                (None, Some(_)) => Err(Error::backing_service(
                    "secretsmanager",
                    format!("secret {} has only a binary value", name),
                )),
                (None, None) => Err(Error::backing_service(
                    "secretsmanager",
                    format!("secret {} has no value", name),
                )),
            },
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_resource_not_found_exception() {
                    debug!("Secret {} does not exist", name);
                    Ok(None)
                } else {
                    Err(Error::backing_service(
                        "secretsmanager",
                        format!(
                            "GetSecretValue {}: {}",
                            name,
                            DisplayErrorContext(&service_error)
                        ),
                    ))
                }
            }
        }
    }
}
