//! Lumo Provision - create a MySQL database and user with generated credentials.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, info_span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use lumo_provision::auth::SystemPrivilegeOracle;
use lumo_provision::cli::{prompt_admin_password, run, Args};
use lumo_provision::config::Settings;
use lumo_provision::provision::MysqlConnector;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let settings = match Settings::resolve(args.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings, args.log_level.as_deref()) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    let span = info_span!("run", run_id = %Uuid::new_v4());
    let _guard = span.enter();
    info!("Starting {} v{}", NAME, VERSION);

    match run(
        &args,
        &settings,
        &MysqlConnector,
        &SystemPrivilegeOracle,
        prompt_admin_password,
    ) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Provisioning failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on settings, writing to stderr so stdout only
/// carries the report.
fn init_logging(
    settings: &Settings,
    level_override: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match level_override {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
    };

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            // Default to pretty format
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
