//! Operator-facing output: the credentials report and the dry-run plan.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::auth::Secret;
use crate::error::ProvisionResult;

use super::request::{PrivilegeMode, ProvisioningRequest};
use super::statements::Statement;

/// Credentials handed to the operator after a successful run.
///
/// This is the only place the generated password is ever rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub database: String,
    pub user: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: Secret,
    pub hosts: Vec<String>,
    pub privilege_mode: PrivilegeMode,
    pub created_at: DateTime<Utc>,
}

fn expose_secret<S: Serializer>(secret: &Secret, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose())
}

impl ProvisionReport {
    /// Build the report for a committed request.
    pub fn from_request(request: &ProvisioningRequest) -> Self {
        Self {
            database: request.database().to_string(),
            user: request.user().to_string(),
            password: request.user_password().clone(),
            hosts: request.allowed_hosts().to_vec(),
            privilege_mode: request.privilege_mode(),
            created_at: Utc::now(),
        }
    }

    /// Human-readable credentials block.
    pub fn render_text(&self) -> String {
        format!(
            "\n=== Database Access ===\n\
             Database:   {}\n\
             User:       {}\n\
             Password:   {}\n\
             Hosts:      {}\n\
             Privileges: {}\n\
             =======================\n",
            self.database,
            self.user,
            self.password.expose(),
            self.hosts.join(","),
            self.privilege_mode,
        )
    }

    /// Pretty-printed JSON for scripting.
    pub fn to_json(&self) -> ProvisionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render planned statements for `--dry-run`, credentials redacted.
pub fn render_plan(statements: &[Statement]) -> String {
    let mut out = String::from("-- planned statements (not executed)\nSTART TRANSACTION;\n");
    for statement in statements {
        out.push_str(statement.redacted());
        out.push_str(";\n");
    }
    out.push_str("COMMIT;\n");
    out
}
