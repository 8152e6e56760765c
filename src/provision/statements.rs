//! SQL statement planning.
//!
//! Builds the fixed statement sequence for a provisioning request. MySQL
//! does not accept placeholders for schema names, account names, or
//! `IDENTIFIED BY` values, so every value is validated upstream and emitted
//! through the quoting helpers here.

use std::fmt;

use crate::auth::REDACTED;

use super::request::ProvisioningRequest;

/// What a planned statement does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    CreateDatabase,
    CreateUser,
    AlterUser,
    Grant,
    FlushPrivileges,
}

/// A single SQL statement with a log-safe rendering.
#[derive(Clone)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    redacted: String,
}

impl Statement {
    fn new(kind: StatementKind, sql: String) -> Self {
        Self {
            kind,
            redacted: sql.clone(),
            sql,
        }
    }

    /// Statement carrying a password literal; logs show `[REDACTED]` instead.
    fn with_secret(kind: StatementKind, prefix: &str, secret: &str) -> Self {
        Self {
            kind,
            sql: format!("{} {}", prefix, quote_literal(secret)),
            redacted: format!("{} '{}'", prefix, REDACTED),
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The SQL sent to the server. May contain credentials.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// SQL with any credential replaced by `[REDACTED]`.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("kind", &self.kind)
            .field("sql", &self.redacted)
            .finish()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted)
    }
}

/// Escape a string for use in a MySQL single-quoted string literal.
/// Handles all special characters that could break out of the string context.
fn escape_mysql_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            '\'' => result.push_str("''"),
            '\\' => result.push_str("\\\\"),
            '\0' => result.push_str("\\0"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\x1a' => result.push_str("\\Z"), // Ctrl+Z
            _ => result.push(c),
        }
    }
    result
}

/// Quote a value as a single-quoted string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_mysql_string(value))
}

/// Quote a schema or table identifier with backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a `'user'@'host'` account name.
pub fn account_name(user: &str, host: &str) -> String {
    format!("{}@{}", quote_literal(user), quote_literal(host))
}

/// Build the ordered statement sequence for `request`.
///
/// One CREATE USER (plus ALTER USER when rotating) and one GRANT is emitted
/// per allowed host, in list order, duplicates included.
pub fn plan(request: &ProvisioningRequest) -> Vec<Statement> {
    let database = quote_identifier(request.database());
    let password = request.user_password().expose();
    let per_host = if request.rotate_password() { 3 } else { 2 };
    let mut statements = Vec::with_capacity(2 + per_host * request.allowed_hosts().len());

    statements.push(Statement::new(
        StatementKind::CreateDatabase,
        format!("CREATE DATABASE IF NOT EXISTS {}", database),
    ));

    for host in request.allowed_hosts() {
        let account = account_name(request.user(), host);

        statements.push(Statement::with_secret(
            StatementKind::CreateUser,
            &format!("CREATE USER IF NOT EXISTS {} IDENTIFIED BY", account),
            password,
        ));

        if request.rotate_password() {
            statements.push(Statement::with_secret(
                StatementKind::AlterUser,
                &format!("ALTER USER {} IDENTIFIED BY", account),
                password,
            ));
        }

        statements.push(Statement::new(
            StatementKind::Grant,
            format!(
                "GRANT {} ON {}.* TO {}",
                request.privilege_mode().grant_list(),
                database,
                account
            ),
        ));
    }

    statements.push(Statement::new(
        StatementKind::FlushPrivileges,
        "FLUSH PRIVILEGES".to_string(),
    ));

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Secret;
    use crate::provision::request::PrivilegeMode;

    fn request(hosts: &[&str], mode: PrivilegeMode) -> ProvisioningRequest {
        ProvisioningRequest::builder("shop", "app")
            .user_password(Secret::new("aB3$xyz!"))
            .allowed_hosts(hosts)
            .privilege_mode(mode)
            .build()
            .unwrap()
    }

    fn kinds(statements: &[Statement]) -> Vec<StatementKind> {
        statements.iter().map(Statement::kind).collect()
    }

    #[test]
    fn test_plan_two_hosts_in_order() {
        let statements = plan(&request(&["localhost", "10.0.0.5"], PrivilegeMode::Full));
        assert_eq!(
            kinds(&statements),
            vec![
                StatementKind::CreateDatabase,
                StatementKind::CreateUser,
                StatementKind::Grant,
                StatementKind::CreateUser,
                StatementKind::Grant,
                StatementKind::FlushPrivileges,
            ]
        );
        assert!(statements[1].sql().contains("'app'@'localhost'"));
        assert!(statements[2].sql().contains("'app'@'localhost'"));
        assert!(statements[3].sql().contains("'app'@'10.0.0.5'"));
        assert!(statements[4].sql().contains("'app'@'10.0.0.5'"));
    }

    #[test]
    fn test_plan_statement_text() {
        let statements = plan(&request(&["localhost"], PrivilegeMode::Full));
        assert_eq!(statements[0].sql(), "CREATE DATABASE IF NOT EXISTS `shop`");
        assert_eq!(
            statements[1].sql(),
            "CREATE USER IF NOT EXISTS 'app'@'localhost' IDENTIFIED BY 'aB3$xyz!'"
        );
        assert_eq!(
            statements[2].sql(),
            "GRANT ALL PRIVILEGES ON `shop`.* TO 'app'@'localhost'"
        );
        assert_eq!(statements[3].sql(), "FLUSH PRIVILEGES");
    }

    #[test]
    fn test_minimal_grant() {
        let statements = plan(&request(&["localhost"], PrivilegeMode::Minimal));
        assert_eq!(
            statements[2].sql(),
            "GRANT SELECT, INSERT, UPDATE, DELETE ON `shop`.* TO 'app'@'localhost'"
        );
    }

    #[test]
    fn test_duplicate_hosts_are_not_deduplicated() {
        let statements = plan(&request(&["localhost", "localhost"], PrivilegeMode::Full));
        let creates = statements
            .iter()
            .filter(|s| s.kind() == StatementKind::CreateUser)
            .count();
        assert_eq!(creates, 2);
    }

    #[test]
    fn test_rotate_password_adds_alter_user() {
        let request = ProvisioningRequest::builder("shop", "app")
            .user_password(Secret::new("aB3$xyz!"))
            .rotate_password(true)
            .build()
            .unwrap();
        let statements = plan(&request);
        assert_eq!(
            kinds(&statements),
            vec![
                StatementKind::CreateDatabase,
                StatementKind::CreateUser,
                StatementKind::AlterUser,
                StatementKind::Grant,
                StatementKind::FlushPrivileges,
            ]
        );
        assert_eq!(
            statements[2].redacted(),
            "ALTER USER 'app'@'localhost' IDENTIFIED BY '[REDACTED]'"
        );
    }

    #[test]
    fn test_password_never_in_redacted_forms() {
        let statements = plan(&request(&["localhost"], PrivilegeMode::Full));
        for statement in &statements {
            assert!(!statement.redacted().contains("aB3$xyz!"));
            assert!(!statement.to_string().contains("aB3$xyz!"));
            assert!(!format!("{:?}", statement).contains("aB3$xyz!"));
        }
        assert_eq!(
            statements[1].redacted(),
            "CREATE USER IF NOT EXISTS 'app'@'localhost' IDENTIFIED BY '[REDACTED]'"
        );
    }

    #[test]
    fn test_quote_literal_escapes() {
        assert_eq!(quote_literal("password123"), "'password123'");
        assert_eq!(quote_literal("pass'word"), "'pass''word'");
        assert_eq!(quote_literal("pass\\word"), "'pass\\\\word'");
        assert_eq!(quote_literal("a\0b\nc\rd\x1ae"), "'a\\0b\\nc\\rd\\Ze'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn test_quote_identifier_doubles_backticks() {
        assert_eq!(quote_identifier("shop"), "`shop`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_special_password_characters_survive_quoting() {
        let request = ProvisioningRequest::builder("shop", "app")
            .user_password(Secret::new("!@#$%^&*()_+-=[]{}|"))
            .build()
            .unwrap();
        let statements = plan(&request);
        assert!(statements[1]
            .sql()
            .ends_with("IDENTIFIED BY '!@#$%^&*()_+-=[]{}|'"));
    }
}
