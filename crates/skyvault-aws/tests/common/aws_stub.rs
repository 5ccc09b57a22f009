//! Stub AWS endpoints for exercising the SDK adapters
//!
//! KMS, SSM and Secrets Manager speak JSON 1.1 over `POST /` and are routed
//! by the `x-amz-target` header. STS speaks the query protocol and answers
//! in XML.

#![allow(dead_code)]

use serde_json::Value;
use skyvault_aws::credentials::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY};
use skyvault_aws::{AwsSettings, EnvConfig};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::constants::*;

pub const AMZ_JSON: &str = "application/x-amz-json-1.1";

pub const KMS_DECRYPT: &str = "TrentService.Decrypt";
pub const SSM_GET_PARAMETER: &str = "AmazonSSM.GetParameter";
pub const SM_GET_SECRET_VALUE: &str = "secretsmanager.GetSecretValue";

/// Settings pointing every client at the stub server with static keys
pub fn stub_settings(server: &MockServer) -> AwsSettings {
    AwsSettings {
        kms_key_id: Some(TEST_KMS_KEY.to_string()),
        s3_bucket_name: Some(TEST_BUCKET.to_string()),
        secret_name: Some(TEST_SECRET.to_string()),
        static_keys: true,
        endpoint_url: Some(server.uri()),
        ..Default::default()
    }
}

/// Static keys accepted by the stub
pub fn stub_env() -> EnvConfig {
    EnvConfig::from_map([
        (AWS_ACCESS_KEY_ID, "AKIASTUB00000001"),
        (AWS_SECRET_ACCESS_KEY, "stub-secret"),
    ])
}

/// Answer a JSON 1.1 operation with a 200 body
pub async fn mock_json_ok(server: &MockServer, target: &str, body: Value) {
    Mock::given(method("POST"))
        .and(header("x-amz-target", target))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), AMZ_JSON))
        .mount(server)
        .await;
}

/// Answer a JSON 1.1 operation with a modelled or unmodelled error
pub async fn mock_json_error(server: &MockServer, target: &str, status: u16, error_type: &str) {
    let body = serde_json::json!({ "__type": error_type, "message": "stubbed failure" });
    Mock::given(method("POST"))
        .and(header("x-amz-target", target))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), AMZ_JSON))
        .mount(server)
        .await;
}

/// Answer AssumeRoleWithWebIdentity with session credentials
pub async fn mock_assume_role_with_web_identity(
    server: &MockServer,
    access_key_id: &str,
    session_token: &str,
    expiration: &str,
) {
    let body = format!(
        r#"<AssumeRoleWithWebIdentityResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <AssumeRoleWithWebIdentityResult>
    <Credentials>
      <AccessKeyId>{}</AccessKeyId>
      <SecretAccessKey>sts-secret</SecretAccessKey>
      <SessionToken>{}</SessionToken>
      <Expiration>{}</Expiration>
    </Credentials>
  </AssumeRoleWithWebIdentityResult>
  <ResponseMetadata>
    <RequestId>00000000-0000-0000-0000-000000000000</RequestId>
  </ResponseMetadata>
</AssumeRoleWithWebIdentityResponse>"#,
        access_key_id, session_token, expiration
    );

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("Action=AssumeRoleWithWebIdentity"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/xml"))
        .mount(server)
        .await;
}

/// Answer S3 object reads and writes under one bucket (path-style)
pub async fn mock_s3_object(server: &MockServer, bucket: &str, key: &str, content: &[u8]) {
    let object_path = format!("/{}/{}", bucket, key);

    Mock::given(method("PUT"))
        .and(path(object_path.clone()))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"stub-etag\""))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(object_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Requests the server received for one JSON 1.1 target
pub async fn requests_for(server: &MockServer, target: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| {
            r.headers
                .get("x-amz-target")
                .and_then(|v| v.to_str().ok())
                == Some(target)
        })
        .collect()
}

/// Parsed JSON body of a recorded request
pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
