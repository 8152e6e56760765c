//! Provisioning request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::Secret;
use crate::error::{ProvisionError, ProvisionResult, ValidationErrorKind};
use crate::validation::{validate_database_name, validate_database_username, validate_host_pattern};

/// Default MySQL server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MySQL server port.
pub const DEFAULT_PORT: u16 = 3306;

/// Default administrative account.
pub const DEFAULT_ADMIN_USER: &str = "root";

/// Privileges granted on the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeMode {
    /// `ALL PRIVILEGES`.
    Full,
    /// `SELECT, INSERT, UPDATE, DELETE` only.
    Minimal,
}

impl PrivilegeMode {
    /// Privilege list as it appears in the GRANT statement.
    pub fn grant_list(&self) -> &'static str {
        match self {
            PrivilegeMode::Full => "ALL PRIVILEGES",
            PrivilegeMode::Minimal => "SELECT, INSERT, UPDATE, DELETE",
        }
    }
}

impl fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeMode::Full => f.write_str("full"),
            PrivilegeMode::Minimal => f.write_str("minimal"),
        }
    }
}

/// Administrative connection target.
#[derive(Debug, Clone)]
pub struct AdminEndpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub credential: Secret,
}

impl fmt::Display for AdminEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.port)
    }
}

/// A validated, immutable provisioning request.
#[derive(Debug, Clone)]
pub struct ProvisioningRequest {
    endpoint: AdminEndpoint,
    database: String,
    user: String,
    user_password: Secret,
    allowed_hosts: Vec<String>,
    privilege_mode: PrivilegeMode,
    rotate_password: bool,
}

impl ProvisioningRequest {
    /// Start building a request for `database` and `user`.
    pub fn builder(database: &str, user: &str) -> ProvisioningRequestBuilder {
        ProvisioningRequestBuilder::new(database, user)
    }

    pub fn endpoint(&self) -> &AdminEndpoint {
        &self.endpoint
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn user_password(&self) -> &Secret {
        &self.user_password
    }

    /// Client host patterns in the order given, duplicates included.
    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    pub fn privilege_mode(&self) -> PrivilegeMode {
        self.privilege_mode
    }

    pub fn rotate_password(&self) -> bool {
        self.rotate_password
    }
}

/// Builder for [`ProvisioningRequest`].
///
/// All identifiers are validated in [`ProvisioningRequestBuilder::build`].
pub struct ProvisioningRequestBuilder {
    host: String,
    port: u16,
    admin_user: String,
    admin_credential: Secret,
    database: String,
    user: String,
    user_password: Option<Secret>,
    allowed_hosts: Vec<String>,
    privilege_mode: PrivilegeMode,
    rotate_password: bool,
}

impl ProvisioningRequestBuilder {
    /// Create a new builder with default connection settings.
    pub fn new(database: &str, user: &str) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_credential: Secret::new(""),
            database: database.to_string(),
            user: user.to_string(),
            user_password: None,
            allowed_hosts: vec![DEFAULT_HOST.to_string()],
            privilege_mode: PrivilegeMode::Full,
            rotate_password: false,
        }
    }

    /// Set the server host.
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Set the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the administrative account name.
    pub fn admin_user(mut self, user: &str) -> Self {
        self.admin_user = user.to_string();
        self
    }

    /// Set the administrative account password.
    pub fn admin_credential(mut self, credential: Secret) -> Self {
        self.admin_credential = credential;
        self
    }

    /// Set the password installed for the new account.
    pub fn user_password(mut self, password: Secret) -> Self {
        self.user_password = Some(password);
        self
    }

    /// Set the client host patterns.
    pub fn allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_hosts = hosts.into_iter().map(|h| h.as_ref().to_string()).collect();
        self
    }

    /// Set the privilege mode.
    pub fn privilege_mode(mut self, mode: PrivilegeMode) -> Self {
        self.privilege_mode = mode;
        self
    }

    /// Also reset the password of accounts that already exist.
    pub fn rotate_password(mut self, rotate: bool) -> Self {
        self.rotate_password = rotate;
        self
    }

    /// Validate all fields and produce the request.
    pub fn build(self) -> ProvisionResult<ProvisioningRequest> {
        validate_database_name(&self.database)?;
        validate_database_username(&self.user)?;

        if self.allowed_hosts.is_empty() {
            return Err(ProvisionError::invalid_parameter(
                "user_host",
                "At least one client host is required",
            ));
        }
        for host in &self.allowed_hosts {
            validate_host_pattern(host)?;
        }

        if self.host.trim().is_empty() {
            return Err(ProvisionError::invalid_parameter(
                "host",
                "Server host cannot be empty",
            ));
        }
        if self.port == 0 {
            return Err(ProvisionError::invalid_parameter(
                "port",
                "Server port cannot be 0",
            ));
        }
        if self.admin_user.is_empty() {
            return Err(ProvisionError::invalid_parameter(
                "admin_user",
                "Administrative user cannot be empty",
            ));
        }

        let user_password = self.user_password.ok_or_else(|| ProvisionError::Validation {
            kind: ValidationErrorKind::MissingParameter {
                param: "user_password".to_string(),
            },
        })?;

        Ok(ProvisioningRequest {
            endpoint: AdminEndpoint {
                host: self.host,
                port: self.port,
                user: self.admin_user,
                credential: self.admin_credential,
            },
            database: self.database,
            user: self.user,
            user_password,
            allowed_hosts: self.allowed_hosts,
            privilege_mode: self.privilege_mode,
            rotate_password: self.rotate_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ProvisioningRequestBuilder {
        ProvisioningRequest::builder("shop", "app").user_password(Secret::new("Pa55!word"))
    }

    #[test]
    fn test_defaults() {
        let request = builder().build().unwrap();
        assert_eq!(request.endpoint().host, "localhost");
        assert_eq!(request.endpoint().port, 3306);
        assert_eq!(request.endpoint().user, "root");
        assert_eq!(request.allowed_hosts(), ["localhost"]);
        assert_eq!(request.privilege_mode(), PrivilegeMode::Full);
        assert!(!request.rotate_password());
    }

    #[test]
    fn test_invalid_identifiers_rejected() {
        assert!(ProvisioningRequest::builder("my-db", "app")
            .user_password(Secret::new("x"))
            .build()
            .is_err());
        assert!(ProvisioningRequest::builder("shop", "app'--")
            .user_password(Secret::new("x"))
            .build()
            .is_err());
        assert!(builder().allowed_hosts(["localhost", "bad host"]).build().is_err());
        assert!(builder().allowed_hosts(Vec::<String>::new()).build().is_err());
        assert!(builder().port(0).build().is_err());
        assert!(builder().host(" ").build().is_err());
    }

    #[test]
    fn test_missing_user_password() {
        let err = ProvisioningRequest::builder("shop", "app").build().unwrap_err();
        assert!(err.to_string().contains("user_password"));
    }

    #[test]
    fn test_endpoint_display_hides_credential() {
        let request = builder()
            .host("db.internal")
            .port(3307)
            .admin_user("admin")
            .admin_credential(Secret::new("topsecret"))
            .build()
            .unwrap();
        assert_eq!(request.endpoint().to_string(), "admin@db.internal:3307");
        assert!(!format!("{:?}", request).contains("topsecret"));
        assert!(!format!("{:?}", request).contains("Pa55!word"));
    }

    #[test]
    fn test_grant_lists() {
        assert_eq!(PrivilegeMode::Full.grant_list(), "ALL PRIVILEGES");
        assert_eq!(
            PrivilegeMode::Minimal.grant_list(),
            "SELECT, INSERT, UPDATE, DELETE"
        );
        assert_eq!(PrivilegeMode::Minimal.to_string(), "minimal");
    }
}
