//! Configuration module for the provisioning tool.
//!
//! Handles loading and validating defaults from an optional TOML file.

mod settings;

pub use settings::*;
