//! Command implementations

pub mod credentials;
pub mod param;
pub mod s3;
pub mod secret;
