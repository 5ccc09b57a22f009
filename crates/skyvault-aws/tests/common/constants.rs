//! Test constants for skyvault-aws tests

#![allow(dead_code)]

pub const TEST_BUCKET: &str = "testBucket";

pub const TEST_SECRET: &str = "testSecret";

pub const TEST_KMS_KEY: &str = "alias/skyvault-test";

pub const DB_PASSWORD_PARAM: &str = "/app/db/password";

pub const DB_PASSWORD_ARN: &str = "arn:aws:ssm:ap-southeast-1:123456789012:parameter/app/db/password";

pub const SERVICE_URL_PARAM: &str = "/app/service/url";

pub const SERVICE_URL_ARN: &str = "arn:aws:ssm:ap-southeast-1:123456789012:parameter/app/service/url";
