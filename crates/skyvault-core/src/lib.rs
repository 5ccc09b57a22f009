//! # skyvault-core
//!
//! Core library for Skyvault providing:
//! - The error taxonomy shared by every crate
//! - A typed reader over the process environment
//! - Process-wide AWS settings, read once at construction

pub mod env;
pub mod error;
pub mod settings;

pub use env::EnvConfig;
pub use error::{Error, Result};
pub use settings::{AwsSettings, DEFAULT_REGION};
