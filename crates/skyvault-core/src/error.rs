//! Error types for skyvault-core

use thiserror::Error;

/// Result type alias using skyvault-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Skyvault
#[derive(Error, Debug)]
pub enum Error {
    /// Required environment value absent or unparsable
    #[error("Missing or invalid configuration value {key}: {reason}")]
    MissingConfig { key: String, reason: String },

    /// No usable credential could be produced for the selected strategy
    #[error("Failed to resolve AWS credentials ({strategy}): {message}")]
    CredentialResolution { strategy: String, message: String },

    /// Parameter or secret does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// Key management rejected the ciphertext or binding context
    #[error("Decryption failed: {message}")]
    Decryption { message: String },

    /// Transport or service-level failure from a backing service
    #[error("{service} request failed: {message}")]
    BackingService { service: String, message: String },

    /// Request rejected locally before any network call
    #[error("Validation failed: {message}")]
    Validation { message: String },
}

impl Error {
    /// Create a missing config error
    pub fn missing_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a credential resolution error
    pub fn credential_resolution(strategy: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CredentialResolution {
            strategy: strategy.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a decryption error
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
        }
    }

    /// Create a backing service error
    pub fn backing_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackingService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
