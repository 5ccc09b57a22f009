//! Secure parameter decryption
//!
//! Parameter-store `SecureString` values fetched without server-side
//! decryption are base64 KMS ciphertext. They are decrypted with the
//! parameter's ARN bound as `PARAMETER_ARN` in the encryption context.

use crate::services::KeyManagement;
use crate::types::{DecryptionContext, ParameterRecord};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use skyvault_core::{Error, Result};
use zeroize::Zeroizing;

/// Build the KMS decrypt input for a still-encrypted record
pub fn decryption_context(
    record: &ParameterRecord,
    key_id: Option<&str>,
) -> Result<DecryptionContext> {
    if record.resource_id.is_empty() {
        return Err(Error::decryption(format!(
            "parameter {} has no ARN to bind the decryption to",
            record.name
        )));
    }

    let ciphertext = STANDARD.decode(record.value.trim()).map_err(|e| {
        Error::decryption(format!(
            "parameter {} is not base64 ciphertext: {}",
            record.name, e
        ))
    })?;

    Ok(DecryptionContext::for_parameter(
        key_id.map(str::to_string),
        ciphertext,
        record.resource_id.clone(),
    ))
}

/// Decrypt a record's ciphertext through KMS
///
/// Every failure is returned to the caller; a decrypt error is never turned
/// into "no value".
pub async fn decrypt_record(
    kms: &dyn KeyManagement,
    record: &ParameterRecord,
    key_id: Option<&str>,
) -> Result<Zeroizing<Vec<u8>>> {
    let context = decryption_context(record, key_id)?;
    let plaintext = kms.decrypt(context).await?;
    Ok(Zeroizing::new(plaintext))
}

/// UTF-8 plaintext as a plain string
pub fn plaintext_to_string(plaintext: Zeroizing<Vec<u8>>) -> Result<String> {
    std::str::from_utf8(&plaintext)
        .map(str::to_string)
        .map_err(|e| Error::decryption(format!("plaintext is not valid UTF-8: {}", e)))
}
