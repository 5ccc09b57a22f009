//! Protected in-memory strings for decrypted secrets
//!
//! Provides:
//! - SecureString: append-only, zeroed on drop, redacted when formatted
//! - Conversion from decrypted plaintext without leaving copies behind

use skyvault_core::{Error, Result};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A secret string that is automatically zeroed on drop
///
/// The only way to add content is [`push`](Self::push). There is no
/// `From<SecureString> for String` and formatting never shows the value;
/// callers read it explicitly through [`expose`](Self::expose).
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create an empty secure string
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty secure string able to hold `bytes` without reallocating
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            inner: String::with_capacity(bytes),
        }
    }

    /// Build from decrypted plaintext, one character at a time
    ///
    /// The plaintext buffer is zeroed when this returns.
    pub fn from_plaintext(plaintext: Zeroizing<Vec<u8>>) -> Result<Self> {
        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| Error::decryption(format!("plaintext is not valid UTF-8: {}", e)))?;

        let mut secure = Self::with_capacity(plaintext.len());
        for ch in text.chars() {
            secure.push(ch);
        }
        Ok(secure)
    }

    /// Append one character
    pub fn push(&mut self, ch: char) {
        if self.inner.capacity() - self.inner.len() < ch.len_utf8() {
            // Grow by hand so the old allocation is wiped instead of freed as-is
            let mut grown = String::with_capacity((self.inner.capacity() * 2).max(16));
            grown.push_str(&self.inner);
            self.inner.zeroize();
            self.inner = grown;
        }
        self.inner.push(ch);
    }

    /// Read the secret value (use with caution)
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString([REDACTED {} bytes])", self.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}
