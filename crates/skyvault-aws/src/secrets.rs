//! Secret bundle parsing

use crate::types::SecretBundle;

/// Parse a secret payload as a flat JSON object of strings
///
/// Anything else (arrays, nested objects, numbers) is rejected as a whole;
/// no partial bundle is ever returned.
pub fn parse_secret_bundle(payload: &str) -> serde_json::Result<SecretBundle> {
    serde_json::from_str::<SecretBundle>(payload)
}
