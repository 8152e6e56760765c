//! The provisioning operation.

use tracing::{error, info, warn};

use crate::auth::ElevatedPrivilege;
use crate::error::{ProvisionError, ProvisionResult};

use super::report::ProvisionReport;
use super::request::ProvisioningRequest;
use super::session::{AdminSession, Connector};
use super::statements::{plan, Statement, StatementKind};

/// Create the database, the account for every allowed host, and the grants,
/// all inside one transaction.
///
/// Any statement failure rolls the transaction back and returns the original
/// error. The session is owned here and released when this function returns,
/// whichever path it takes.
pub fn provision<C>(
    connector: &C,
    request: &ProvisioningRequest,
    _privilege: &ElevatedPrivilege,
) -> ProvisionResult<ProvisionReport>
where
    C: Connector + ?Sized,
{
    let statements = plan(request);

    let mut session = connector.connect(request.endpoint())?;
    info!(endpoint = %request.endpoint(), "Connected to database server");

    session.begin()?;

    if let Err(e) = execute_all(&mut session, &statements) {
        warn!(error = %e, "Statement failed, rolling back transaction");
        if let Err(rollback_err) = session.rollback() {
            error!(error = %rollback_err, "Rollback failed");
        }
        return Err(e);
    }

    session.commit()?;
    info!(
        database = request.database(),
        user = request.user(),
        hosts = request.allowed_hosts().len(),
        "Provisioning committed"
    );

    Ok(ProvisionReport::from_request(request))
}

fn execute_all<S: AdminSession>(
    session: &mut S,
    statements: &[Statement],
) -> ProvisionResult<()> {
    for statement in statements {
        match statement.kind() {
            StatementKind::CreateDatabase => info!("Creating database"),
            StatementKind::CreateUser => info!(sql = %statement, "Creating user"),
            StatementKind::AlterUser => info!(sql = %statement, "Resetting user password"),
            StatementKind::Grant => info!(sql = %statement, "Granting privileges"),
            StatementKind::FlushPrivileges => info!("Flushing privileges"),
        }
        session.execute(statement)?;
    }
    Ok(())
}
