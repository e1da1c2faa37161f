//! Runtime health verification
//!
//! Probes the PHP runtime for required and optional extensions, checks that
//! OPcache is loaded and usable and that requests are served by PHP-FPM,
//! and optionally that the database accepts connections. Every outcome is
//! a [`Finding`]; nothing here fails with an error. The report is
//! UNHEALTHY iff at least one finding is an error.
//!
//! Under the PHP CLI `fastcgi_finish_request` never exists, so a probe run
//! through [`PhpCli`] always carries the process-mode warning.

pub mod checks;
pub mod database;
pub mod probe;
pub mod report;

pub use probe::{PhpCli, RuntimeProbe};
pub use report::{Finding, HealthReport, Status};

use crate::config::HealthConfig;
use crate::error::PreflightError;

/// Classify the runtime checks against `probe`, then check the database if configured
pub fn check(config: &HealthConfig, probe: &dyn RuntimeProbe) -> HealthReport {
    let mut report = HealthReport::new();
    report.extend(checks::run_all(&config.required, &config.optional, probe));

    if let Some(target) = &config.database {
        report.extend(database::check_database(target));
    }

    report
}

/// Query the configured PHP binary and check it
///
/// A runtime that cannot be queried at all is reported as a single error.
pub fn verify(config: &HealthConfig) -> HealthReport {
    let php = PhpCli::new(&config.php_binary).with_timeout(config.php_timeout);

    match php.inventory(checks::PROBED_FUNCTIONS) {
        Ok(inventory) => check(config, &inventory),
        Err(e) => {
            tracing::debug!(error = %e, "PHP runtime probe failed");
            let reason = match e {
                PreflightError::ProbeFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            let mut report = HealthReport::new();
            report.push(Finding::error(format!("php runtime unavailable: {reason}")));
            report
        }
    }
}
