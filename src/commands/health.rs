//! Health command implementation

use std::path::PathBuf;

use crate::cli::HealthArgs;
use crate::config::{ConfigFile, DatabaseSection, HealthConfig, HealthSection};
use crate::error::Result;
use crate::health::{self, Status};

/// Run health command
///
/// The returned status decides the exit code; a configuration error never
/// gets as far as probing.
pub fn run(config_path: Option<PathBuf>, args: HealthArgs) -> Result<Status> {
    let cwd = std::env::current_dir()?;
    let file = ConfigFile::discover(config_path.as_deref(), &cwd)?;
    let config = HealthConfig::resolve(file.health.merge(overrides(&args)))?;

    let report = health::verify(&config);
    tracing::debug!(
        status = %report.status(),
        errors = report.errors().len(),
        warnings = report.warnings().len(),
        "health check finished"
    );

    if args.json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(report.status())
}

/// CLI flags as the top configuration layer; empty lists leave the lower layer in place
fn overrides(args: &HealthArgs) -> HealthSection {
    let database = (args.db_host.is_some() || args.db_port.is_some() || args.db_timeout_ms.is_some())
        .then(|| DatabaseSection {
            host: args.db_host.clone(),
            port: args.db_port,
            timeout_ms: args.db_timeout_ms,
        });

    HealthSection {
        required: (!args.required.is_empty()).then(|| args.required.clone()),
        optional: (!args.optional.is_empty()).then(|| args.optional.clone()),
        php_binary: args.php_binary.clone(),
        php_timeout_ms: args.php_timeout_ms,
        database,
    }
}
