//! Process privilege verification.
//!
//! Provisioning must only run from an elevated (root) context. The check is
//! expressed as an oracle so callers can inject a fake in tests, and its
//! outcome as a token that the provisioning operation requires.

use tracing::debug;

use crate::error::{ProvisionError, ProvisionResult};

/// Source of the invoking process's effective UID.
pub trait PrivilegeOracle {
    /// Effective user ID of the current process.
    fn effective_uid(&self) -> u32;
}

/// Oracle backed by `geteuid(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrivilegeOracle;

impl PrivilegeOracle for SystemPrivilegeOracle {
    fn effective_uid(&self) -> u32 {
        nix::unistd::geteuid().as_raw()
    }
}

/// Proof that the privilege gate was passed.
///
/// Can only be obtained through [`ElevatedPrivilege::check`].
#[derive(Debug)]
pub struct ElevatedPrivilege {
    euid: u32,
}

impl ElevatedPrivilege {
    /// Verify that the process runs with an effective UID of 0.
    pub fn check<O: PrivilegeOracle + ?Sized>(oracle: &O) -> ProvisionResult<Self> {
        let euid = oracle.effective_uid();
        if euid != 0 {
            return Err(ProvisionError::Privilege { euid });
        }

        debug!(euid, "Privilege check passed");
        Ok(Self { euid })
    }

    /// The effective UID observed when the check passed.
    pub fn euid(&self) -> u32 {
        self.euid
    }
}
