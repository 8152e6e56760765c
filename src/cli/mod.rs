//! Command-line front end.
//!
//! Turns parsed arguments and settings into a provisioning request, runs
//! the privilege gate, and renders the report.

mod args;
mod prompt;

pub use args::{Args, OutputFormat, ROOT_PASSWORD_ENV};
pub use prompt::prompt_admin_password;

use tracing::info;

use crate::auth::{ElevatedPrivilege, PrivilegeOracle, Secret};
use crate::config::Settings;
use crate::error::ProvisionResult;
use crate::password::{generate_password, PasswordPolicy};
use crate::provision::{plan, provision, render_plan, Connector};

/// Execute one invocation and return the text destined for stdout.
///
/// Order of checks:
/// 1. Password policy and request validation (no side effects)
/// 2. Privilege gate
/// 3. Administrative credential (flag, env, or `prompt`)
/// 4. Provisioning
///
/// `--dry-run` stops after step 1 and returns the statement plan.
pub fn run<C, O, P>(
    args: &Args,
    settings: &Settings,
    connector: &C,
    oracle: &O,
    prompt: P,
) -> ProvisionResult<String>
where
    C: Connector + ?Sized,
    O: PrivilegeOracle + ?Sized,
    P: FnOnce(&str) -> ProvisionResult<Secret>,
{
    let policy = PasswordPolicy::new(args.password_length(settings))?;
    let password = generate_password(&policy, &mut rand::rng());
    let builder = args.request_builder(settings, password)?;

    if args.dry_run {
        let request = builder.build()?;
        info!(database = request.database(), "Dry run, no statements executed");
        return Ok(render_plan(&plan(&request)));
    }

    let privilege = ElevatedPrivilege::check(oracle)?;

    let admin_user = args
        .admin_user
        .as_deref()
        .unwrap_or(&settings.mysql.admin_user);
    let credential = match &args.root_password {
        Some(secret) => secret.clone(),
        None => prompt(admin_user)?,
    };

    let request = builder.admin_credential(credential).build()?;
    let report = provision(connector, &request, &privilege)?;

    match args.output {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}
