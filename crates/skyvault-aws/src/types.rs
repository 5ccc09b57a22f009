//! Request-scoped value types shared by the services and the facade

use std::collections::HashMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Encryption-context key binding SSM ciphertext to its parameter
pub const PARAMETER_ARN: &str = "PARAMETER_ARN";

/// Flat string-to-string secret payload from Secrets Manager
pub type SecretBundle = HashMap<String, String>;

/// A parameter as returned by the parameter store
#[derive(Clone, PartialEq, Eq)]
pub struct ParameterRecord {
    pub name: String,
    pub value: String,
    /// ARN of the parameter, required for the decrypt binding
    pub resource_id: String,
    /// Stored as a `SecureString` parameter
    pub is_encrypted: bool,
}

impl ParameterRecord {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        resource_id: impl Into<String>,
        is_encrypted: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            resource_id: resource_id.into(),
            is_encrypted,
        }
    }
}

impl fmt::Debug for ParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterRecord")
            .field("name", &self.name)
            .field("value", &format_args!("[REDACTED {} bytes]", self.value.len()))
            .field("resource_id", &self.resource_id)
            .field("is_encrypted", &self.is_encrypted)
            .finish()
    }
}

/// Input of a KMS decrypt call
///
/// `binding_context` always carries [`PARAMETER_ARN`] for parameter-store
/// ciphertext; KMS refuses to decrypt when it differs from the context used
/// at encryption time. The ciphertext is zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecryptionContext {
    #[zeroize(skip)]
    pub key_id: Option<String>,
    pub ciphertext: Vec<u8>,
    #[zeroize(skip)]
    pub binding_context: HashMap<String, String>,
}

impl DecryptionContext {
    /// Context bound to a parameter ARN
    pub fn for_parameter(
        key_id: Option<String>,
        ciphertext: Vec<u8>,
        parameter_arn: impl Into<String>,
    ) -> Self {
        let mut binding_context = HashMap::new();
        binding_context.insert(PARAMETER_ARN.to_string(), parameter_arn.into());
        Self {
            key_id,
            ciphertext,
            binding_context,
        }
    }

    /// The parameter ARN this context is bound to
    pub fn parameter_arn(&self) -> Option<&str> {
        self.binding_context.get(PARAMETER_ARN).map(String::as_str)
    }
}

impl fmt::Debug for DecryptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionContext")
            .field("key_id", &self.key_id)
            .field("ciphertext", &format_args!("[{} bytes]", self.ciphertext.len()))
            .field("binding_context", &self.binding_context)
            .finish()
    }
}
