//! Database and account provisioning.
//!
//! This module provides:
//! - The validated request model and its builder
//! - Statement planning with safe quoting
//! - The session traits and their MySQL implementation
//! - The transactional provisioning operation and its report

mod driver;
mod operation;
mod report;
mod request;
mod session;
mod statements;

pub use driver::{MysqlConnector, MysqlSession};
pub use operation::provision;
pub use report::{render_plan, ProvisionReport};
pub use request::{
    AdminEndpoint, PrivilegeMode, ProvisioningRequest, ProvisioningRequestBuilder,
    DEFAULT_ADMIN_USER, DEFAULT_HOST, DEFAULT_PORT,
};
pub use session::{AdminSession, Connector};
pub use statements::{
    account_name, plan, quote_identifier, quote_literal, Statement, StatementKind,
};
