//! Common test utilities for skyvault-aws
//!
//! This module provides shared test infrastructure including:
//! - Constants for parameter names, ARNs and buckets
//! - In-memory fakes for every backing service
//! - A tracing layer that records emitted events
//! - Stub AWS endpoints for the SDK-backed adapters

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod aws_stub;
pub mod constants;
pub mod fakes;
pub mod log_capture;

pub use aws_stub::*;
pub use constants::*;
pub use fakes::*;
pub use log_capture::*;
