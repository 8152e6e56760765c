//! Database session abstraction.
//!
//! The provisioning operation talks to the server only through these
//! traits, so tests can substitute a recording fake for a live MySQL
//! connection.

use crate::error::{ProvisionError, ProvisionResult};

use super::request::AdminEndpoint;
use super::statements::Statement;

/// An open administrative session: one connection and its statement handle.
///
/// Implementations release the connection when dropped. The provisioning
/// operation owns the session, so release happens exactly once on every
/// exit path.
pub trait AdminSession {
    /// Start a transaction.
    fn begin(&mut self) -> ProvisionResult<()>;

    /// Execute a single statement inside the open transaction.
    fn execute(&mut self, statement: &Statement) -> ProvisionResult<()>;

    /// Commit the open transaction.
    fn commit(&mut self) -> ProvisionResult<()>;

    /// Roll back the open transaction.
    fn rollback(&mut self) -> ProvisionResult<()>;
}

/// Opens administrative sessions.
pub trait Connector {
    type Session: AdminSession;

    /// Connect and authenticate against `endpoint`.
    ///
    /// Failures are reported as [`ProvisionError::Connection`].
    fn connect(&self, endpoint: &AdminEndpoint) -> ProvisionResult<Self::Session>;
}
