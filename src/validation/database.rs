//! Database identifier validation.
//!
//! Database and account names are spliced into DDL statements that the
//! server cannot parameterize, so they are held to a strict whitelist.
//! Account names only ever appear as quoted string literals and may also
//! contain `-` and `.`.

use crate::error::{ProvisionError, ProvisionResult};

/// Maximum length for database names (MySQL limit).
const MAX_DATABASE_NAME_LENGTH: usize = 64;

/// Maximum length for database usernames (MySQL 5.7+ limit).
const MAX_DATABASE_USERNAME_LENGTH: usize = 32;

/// Schemas owned by the server itself.
const RESERVED_DATABASES: &[&str] = &["mysql", "information_schema", "performance_schema", "sys"];

/// Accounts that must never be re-created or re-granted by this tool.
const RESERVED_USERNAMES: &[&str] = &["root"];

/// Characters allowed in account names beyond letters, digits, and `_`.
const USERNAME_EXTRA_CHARS: &[char] = &['-', '.'];

/// Validates a database name.
///
/// # Rules
///
/// - Must be 1-64 characters
/// - Must start with a letter or underscore
/// - Can contain only alphanumeric characters and underscores
/// - Cannot be one of the server's system schemas
pub fn validate_database_name(name: &str) -> ProvisionResult<&str> {
    validate_identifier(
        "db_name",
        "Database name",
        name,
        MAX_DATABASE_NAME_LENGTH,
        &[],
    )?;

    let lower = name.to_lowercase();
    if RESERVED_DATABASES.contains(&lower.as_str()) {
        return Err(ProvisionError::invalid_parameter(
            "db_name",
            format!("'{}' is a reserved system database", name),
        ));
    }

    Ok(name)
}

/// Validates a database username.
///
/// # Rules
///
/// - Must be 1-32 characters
/// - Must start with a letter or underscore
/// - Can contain only alphanumeric characters, underscores, hyphens, and dots
/// - Cannot be `root`
pub fn validate_database_username(username: &str) -> ProvisionResult<&str> {
    validate_identifier(
        "db_user",
        "Database username",
        username,
        MAX_DATABASE_USERNAME_LENGTH,
        USERNAME_EXTRA_CHARS,
    )?;

    let lower = username.to_lowercase();
    if RESERVED_USERNAMES.contains(&lower.as_str()) {
        return Err(ProvisionError::invalid_parameter(
            "db_user",
            format!("'{}' is a reserved account", username),
        ));
    }

    Ok(username)
}

fn validate_identifier(
    param: &str,
    label: &str,
    value: &str,
    max_length: usize,
    extra_chars: &[char],
) -> ProvisionResult<()> {
    let Some(first_char) = value.chars().next() else {
        return Err(ProvisionError::invalid_parameter(
            param,
            format!("{} cannot be empty", label),
        ));
    };

    if value.len() > max_length {
        return Err(ProvisionError::invalid_parameter(
            param,
            format!("{} exceeds maximum length of {} characters", label, max_length),
        ));
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(ProvisionError::invalid_parameter(
            param,
            format!("{} must start with a letter or underscore", label),
        ));
    }

    if let Some(invalid) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || extra_chars.contains(c)))
    {
        return Err(ProvisionError::invalid_parameter(
            param,
            format!("{} contains invalid character '{}'", label, invalid),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_database_name() {
        assert!(validate_database_name("shop").is_ok());
        assert!(validate_database_name("app_production").is_ok());
        assert!(validate_database_name("_private_db").is_ok());
        assert!(validate_database_name("db1").is_ok());
    }

    #[test]
    fn test_invalid_database_name() {
        // Empty
        assert!(validate_database_name("").is_err());
        // Starts with number
        assert!(validate_database_name("1database").is_err());
        // Contains special characters
        assert!(validate_database_name("my-database").is_err());
        assert!(validate_database_name("my.database").is_err());
        assert!(validate_database_name("my database").is_err());
        assert!(validate_database_name("db`name").is_err());
        // SQL injection attempt
        assert!(validate_database_name("db; DROP DATABASE mysql;--").is_err());
    }

    #[test]
    fn test_reserved_database_names() {
        assert!(validate_database_name("mysql").is_err());
        assert!(validate_database_name("MySQL").is_err());
        assert!(validate_database_name("information_schema").is_err());
        assert!(validate_database_name("performance_schema").is_err());
        assert!(validate_database_name("sys").is_err());
    }

    #[test]
    fn test_database_name_length() {
        let long_name = "a".repeat(65);
        assert!(validate_database_name(&long_name).is_err());
        let max_name = "a".repeat(64);
        assert!(validate_database_name(&max_name).is_ok());
    }

    #[test]
    fn test_valid_database_username() {
        assert!(validate_database_username("app").is_ok());
        assert!(validate_database_username("readonly").is_ok());
        assert!(validate_database_username("_svc").is_ok());
        assert!(validate_database_username("app-ro").is_ok());
        assert!(validate_database_username("first.last").is_ok());
    }

    #[test]
    fn test_invalid_database_username() {
        assert!(validate_database_username("").is_err());
        assert!(validate_database_username("1user").is_err());
        assert!(validate_database_username("user@host").is_err());
        assert!(validate_database_username("o'brien").is_err());
        assert!(validate_database_username("-app").is_err());
        assert!(validate_database_username("app ro").is_err());
        assert!(validate_database_username("app%").is_err());
        assert!(validate_database_username("root").is_err());
        assert!(validate_database_username("ROOT").is_err());
    }

    #[test]
    fn test_database_username_length() {
        let long_name = "a".repeat(33);
        assert!(validate_database_username(&long_name).is_err());
        let max_name = "a".repeat(32);
        assert!(validate_database_username(&max_name).is_ok());
    }

    #[test]
    fn test_error_names_parameter() {
        let err = validate_database_username("bad name").unwrap_err();
        assert!(err.to_string().contains("'db_user'"));
        assert!(err.to_string().contains("invalid character ' '"));
    }
}
