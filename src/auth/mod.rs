//! Privilege and credential handling.
//!
//! This module provides:
//! - The root privilege gate, checked before any prompt or network action
//! - A redacting wrapper for credentials

mod privilege;
mod secret;

pub use privilege::{ElevatedPrivilege, PrivilegeOracle, SystemPrivilegeOracle};
pub use secret::{Secret, REDACTED};
