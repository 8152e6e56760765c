//! Client host pattern validation.
//!
//! Validates the host part of a MySQL account (`'user'@'host'`). Host
//! patterns may be hostnames, IPv4/IPv6 addresses, netmasks, or contain
//! the `%` and `_` wildcards.

use crate::error::{ProvisionError, ProvisionResult};

/// Maximum length of the host part of an account name (MySQL 8.0.17+).
const MAX_HOST_LENGTH: usize = 255;

/// Punctuation allowed in a host pattern besides ASCII alphanumerics.
const HOST_PUNCTUATION: &[char] = &['.', '-', '_', '%', ':', '/'];

/// Validates a single host pattern.
///
/// # Rules
///
/// - Must be 1-255 characters
/// - Can contain only alphanumerics and `. - _ % : /`
///
/// Quotes, backslashes, whitespace, and control characters are rejected,
/// so the pattern can be emitted as a plain single-quoted literal.
pub fn validate_host_pattern(host: &str) -> ProvisionResult<&str> {
    if host.is_empty() {
        return Err(ProvisionError::invalid_parameter(
            "user_host",
            "Host pattern cannot be empty",
        ));
    }

    if host.len() > MAX_HOST_LENGTH {
        return Err(ProvisionError::invalid_parameter(
            "user_host",
            format!(
                "Host pattern exceeds maximum length of {} characters",
                MAX_HOST_LENGTH
            ),
        ));
    }

    if let Some(bad) = host
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !HOST_PUNCTUATION.contains(c))
    {
        return Err(ProvisionError::invalid_parameter(
            "user_host",
            format!("Host pattern '{}' contains invalid character {:?}", host, bad),
        ));
    }

    Ok(host)
}

/// Parses a comma-separated host list.
///
/// Entries are trimmed and validated. Order is preserved and duplicates are
/// kept as given. An empty entry (e.g. a trailing comma) is an error rather
/// than an implicit `''` host, which MySQL would treat as `%`.
pub fn parse_host_list(list: &str) -> ProvisionResult<Vec<String>> {
    list.split(',')
        .map(|entry| validate_host_pattern(entry.trim()).map(str::to_string))
        .collect()
}
