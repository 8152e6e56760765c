//! Command-line arguments.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::auth::Secret;
use crate::config::Settings;
use crate::error::ProvisionResult;
use crate::provision::{PrivilegeMode, ProvisioningRequest, ProvisioningRequestBuilder};
use crate::validation::parse_host_list;

/// Environment variable consulted for the administrative password.
pub const ROOT_PASSWORD_ENV: &str = "LUMO_MYSQL_ROOT_PASSWORD";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Create a MySQL database and a user with a generated password.
#[derive(Debug, Parser)]
#[command(name = "lumo-provision", version)]
pub struct Args {
    /// MySQL server address [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// MySQL server port [default: 3306]
    #[arg(long)]
    pub port: Option<u16>,

    /// Administrative account to connect as [default: root]
    #[arg(long)]
    pub admin_user: Option<String>,

    /// Administrative password (prompted for without echo if omitted)
    #[arg(long, env = ROOT_PASSWORD_ENV, hide_env_values = true, value_parser = parse_secret)]
    pub root_password: Option<Secret>,

    /// Database to create
    #[arg(long)]
    pub db_name: String,

    /// Database user to create (letters, digits, `_`, `-`, `.`)
    #[arg(long)]
    pub db_user: String,

    /// Length of the generated password [default: 8]
    #[arg(long)]
    pub password_length: Option<usize>,

    /// Hosts the user may connect from, comma-separated
    #[arg(long, default_value = "localhost")]
    pub user_host: String,

    /// Grant only SELECT, INSERT, UPDATE, DELETE
    #[arg(long)]
    pub minimal_privileges: bool,

    /// Reset the password of accounts that already exist
    #[arg(long)]
    pub rotate_password: bool,

    /// Print the planned statements without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Path to configuration file [default: /etc/lumo/provision.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_secret(value: &str) -> Result<Secret, Infallible> {
    Ok(Secret::new(value))
}

impl Args {
    pub fn privilege_mode(&self) -> PrivilegeMode {
        if self.minimal_privileges {
            PrivilegeMode::Minimal
        } else {
            PrivilegeMode::Full
        }
    }

    /// Generated password length: flag, then config file.
    pub fn password_length(&self, settings: &Settings) -> usize {
        self.password_length.unwrap_or(settings.password.length)
    }

    /// Start a request from these arguments, layered over `settings`.
    ///
    /// The administrative credential is not set here; it is resolved only
    /// after the privilege gate.
    pub fn request_builder(
        &self,
        settings: &Settings,
        user_password: Secret,
    ) -> ProvisionResult<ProvisioningRequestBuilder> {
        let hosts = parse_host_list(&self.user_host)?;

        Ok(ProvisioningRequest::builder(&self.db_name, &self.db_user)
            .host(self.host.as_deref().unwrap_or(&settings.mysql.host))
            .port(self.port.unwrap_or(settings.mysql.port))
            .admin_user(
                self.admin_user
                    .as_deref()
                    .unwrap_or(&settings.mysql.admin_user),
            )
            .user_password(user_password)
            .allowed_hosts(hosts)
            .privilege_mode(self.privilege_mode())
            .rotate_password(self.rotate_password))
    }
}
