//! SSM Parameter Store backend

use super::ParameterStore;
use crate::types::ParameterRecord;
use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::{Parameter, ParameterType};
use aws_sdk_ssm::Client;
use skyvault_core::{Error, Result};
use tracing::debug;

/// Parameter store operations over an SSM client
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore").finish_non_exhaustive()
    }
}

/// Convert an SDK parameter into a record, falling back to the requested name
pub(crate) fn to_record(parameter: Parameter, requested: &str) -> ParameterRecord {
    let is_encrypted = parameter.r#type == Some(ParameterType::SecureString);
    ParameterRecord {
        name: parameter.name.unwrap_or_else(|| requested.to_string()),
        value: parameter.value.unwrap_or_default(),
        resource_id: parameter.arn.unwrap_or_default(),
        is_encrypted,
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<ParameterRecord>> {
        debug!(
            "Getting parameter {} (with_decryption: {})",
            name, with_decryption
        );

        let resp = match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_parameter_not_found() {
                    debug!("Parameter {} does not exist", name);
                    return Ok(None);
                }
                return Err(Error::backing_service(
                    "ssm",
                    format!(
                        "GetParameter {}: {}",
                        name,
                        DisplayErrorContext(&service_error)
                    ),
                ));
            }
        };

        Ok(resp.parameter.map(|p| to_record(p, name)))
    }
}
