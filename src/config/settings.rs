//! Configuration settings for the provisioning tool.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, ProvisionResult};
use crate::password::{PasswordPolicy, DEFAULT_PASSWORD_LENGTH};
use crate::provision::{DEFAULT_ADMIN_USER, DEFAULT_HOST, DEFAULT_PORT};

/// Configuration file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lumo/provision.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub mysql: MysqlConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Administrative connection defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MysqlConfig {
    /// MySQL server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// MySQL server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Administrative account used to connect.
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
}

/// Generated password settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Length of generated passwords.
    #[serde(default = "default_password_length")]
    pub length: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_admin_user() -> String {
    DEFAULT_ADMIN_USER.to_string()
}

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_user: default_admin_user(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: default_password_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> ProvisionResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ProvisionError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ProvisionError::Config {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Resolve settings for this invocation.
    ///
    /// An explicitly named file must exist. The default file is optional;
    /// built-in defaults apply when it is absent.
    pub fn resolve(explicit: Option<&Path>) -> ProvisionResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> ProvisionResult<()> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ProvisionError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(ProvisionError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.mysql.port == 0 {
            return Err(ProvisionError::Config {
                message: "Invalid MySQL port 0".to_string(),
            });
        }

        if self.mysql.host.trim().is_empty() || self.mysql.admin_user.trim().is_empty() {
            return Err(ProvisionError::Config {
                message: "MySQL host and admin_user cannot be empty".to_string(),
            });
        }

        PasswordPolicy::new(self.password.length).map_err(|e| ProvisionError::Config {
            message: format!("Invalid password length: {}", e),
        })?;

        Ok(())
    }
}
