//! Lumo Provision Library
//!
//! This crate provides the core functionality for the Lumo MySQL
//! provisioning tool, which creates a database and an account with a
//! generated password inside a single transaction.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod password;
pub mod provision;
pub mod validation;
