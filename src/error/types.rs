//! Error types for the provisioning tool.

use thiserror::Error;

/// Main error type for provisioning operations.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The invoking process is not running with elevated privileges.
    #[error("Privilege error: this tool must run as root (effective UID {euid}); retry with sudo")]
    Privilege { euid: u32 },

    /// Password policy violations.
    #[error("Password policy error: {kind}")]
    Policy { kind: PolicyErrorKind },

    /// Validation errors.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// The administrative connection could not be established.
    #[error("Connection error: failed to connect to {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// Starting or committing the transaction failed.
    #[error("Transaction error: {operation} failed: {message}")]
    Transaction {
        operation: &'static str,
        message: String,
    },

    /// A statement failed inside the open transaction.
    ///
    /// `statement` is the redacted statement text, safe to print.
    #[error("Statement error: `{statement}` failed: {message}")]
    Statement { statement: String, message: String },

    /// Interactive prompt failures.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Password policy error kinds.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyErrorKind {
    #[error("length {length} is shorter than the {required} required character classes")]
    LengthTooShort { length: usize, required: usize },

    #[error("length {length} exceeds the maximum of {maximum}")]
    LengthTooLong { length: usize, maximum: usize },
}

/// Validation error kinds.
#[derive(Error, Debug)]
pub enum ValidationErrorKind {
    #[error("Missing required parameter: {param}")]
    MissingParameter { param: String },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl ProvisionError {
    /// Shorthand for an invalid parameter validation error.
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        ProvisionError::Validation {
            kind: ValidationErrorKind::InvalidParameter {
                param: param.to_string(),
                message: message.into(),
            },
        }
    }

    /// Whether this error was raised after the transaction was opened.
    pub fn is_statement_error(&self) -> bool {
        matches!(self, ProvisionError::Statement { .. })
    }
}

/// Result type alias for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
