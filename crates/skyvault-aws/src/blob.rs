//! Blob store request validation

use skyvault_core::{Error, Result};
use std::time::Duration;

/// Longest presigned link S3 accepts: 7 days
pub const MAX_PRESIGN_EXPIRY_MINS: i64 = 10_080;

/// Content type used when the caller does not give one
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Check a presign expiry locally, before any credential or network work
pub fn presign_expiry(expiry_mins: i64) -> Result<Duration> {
    if expiry_mins > MAX_PRESIGN_EXPIRY_MINS {
        return Err(Error::validation(format!(
            "Expiry cannot be greater than 7 days ({} minutes), got {}",
            MAX_PRESIGN_EXPIRY_MINS, expiry_mins
        )));
    }
    if expiry_mins < 1 {
        return Err(Error::validation(format!(
            "Expiry must be at least 1 minute, got {}",
            expiry_mins
        )));
    }
    Ok(Duration::from_secs(expiry_mins as u64 * 60))
}

/// Pick the explicit bucket, else the configured default
pub fn resolve_bucket(explicit: Option<&str>, default: Option<&str>) -> Result<String> {
    explicit
        .filter(|b| !b.is_empty())
        .or(default)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::missing_config(
                skyvault_core::settings::S3_BUCKET_NAME,
                "no bucket given and no default configured",
            )
        })
}
