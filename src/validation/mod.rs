//! Input validation module.
//!
//! Provides validators for database names, account names, and client host
//! patterns.

mod database;
mod host;

pub use database::{validate_database_name, validate_database_username};
pub use host::{parse_host_list, validate_host_pattern};
