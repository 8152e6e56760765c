//! MySQL-backed session using the blocking `mysql` driver.

use mysql::prelude::Queryable;
use mysql::{Conn, Opts, OptsBuilder};
use tracing::debug;

use crate::error::{ProvisionError, ProvisionResult};

use super::request::AdminEndpoint;
use super::session::{AdminSession, Connector};
use super::statements::Statement;

/// Connects to a MySQL-compatible server over TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlConnector;

impl Connector for MysqlConnector {
    type Session = MysqlSession;

    fn connect(&self, endpoint: &AdminEndpoint) -> ProvisionResult<MysqlSession> {
        debug!(endpoint = %endpoint, "Opening administrative connection");

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(endpoint.host.as_str()))
            .tcp_port(endpoint.port)
            .user(Some(endpoint.user.as_str()))
            .pass(Some(endpoint.credential.expose()));

        let conn = Conn::new(Opts::from(opts)).map_err(|e| ProvisionError::Connection {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        Ok(MysqlSession {
            conn,
            endpoint: endpoint.to_string(),
        })
    }
}

/// An open MySQL connection. Closed when dropped.
pub struct MysqlSession {
    conn: Conn,
    endpoint: String,
}

impl MysqlSession {
    fn transaction_control(
        &mut self,
        operation: &'static str,
        sql: &str,
    ) -> ProvisionResult<()> {
        self.conn
            .query_drop(sql)
            .map_err(|e| ProvisionError::Transaction {
                operation,
                message: e.to_string(),
            })
    }
}

impl AdminSession for MysqlSession {
    fn begin(&mut self) -> ProvisionResult<()> {
        self.transaction_control("begin", "START TRANSACTION")
    }

    fn execute(&mut self, statement: &Statement) -> ProvisionResult<()> {
        debug!(sql = %statement, "Executing statement");
        self.conn
            .query_drop(statement.sql())
            .map_err(|e| ProvisionError::Statement {
                statement: statement.redacted().to_string(),
                message: e.to_string(),
            })
    }

    fn commit(&mut self) -> ProvisionResult<()> {
        self.transaction_control("commit", "COMMIT")
    }

    fn rollback(&mut self) -> ProvisionResult<()> {
        self.transaction_control("rollback", "ROLLBACK")
    }
}

impl Drop for MysqlSession {
    fn drop(&mut self) {
        // `conn` is dropped right after this, which closes the socket.
        debug!(endpoint = %self.endpoint, "Database connection closed");
    }
}
