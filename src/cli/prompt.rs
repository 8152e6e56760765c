//! Interactive credential prompt.

use dialoguer::Password;

use crate::auth::Secret;
use crate::error::{ProvisionError, ProvisionResult};

/// Ask for the administrative password without echoing input.
pub fn prompt_admin_password(admin_user: &str) -> ProvisionResult<Secret> {
    let password = Password::new()
        .with_prompt(format!("Enter MySQL password for '{}'", admin_user))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| ProvisionError::Prompt {
            message: format!("Failed to read password: {e}"),
        })?;

    Ok(Secret::from(password))
}
