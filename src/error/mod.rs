//! Error types for the provisioning tool.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
