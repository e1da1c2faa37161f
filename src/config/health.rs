//! Health verifier settings

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Extensions the application cannot run without
pub const DEFAULT_REQUIRED: &[&str] = &["pdo", "pdo_mysql", "mbstring", "zip"];

/// Extensions that only degrade the application when absent
pub const DEFAULT_OPTIONAL: &[&str] = &["redis", "apcu"];

pub const DEFAULT_PHP_BINARY: &str = "php";

/// Upper bound on each php CLI invocation
pub const DEFAULT_PHP_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_DB_PORT: u16 = 3306;

pub const DEFAULT_DB_TIMEOUT_MS: u64 = 2000;

/// `health:` section of preflight.yaml, or the equivalent CLI flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_binary: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_timeout_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseSection>,
}

/// `health.database:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl HealthSection {
    /// Layer `overrides` on top of `self`; every set field in `overrides` wins
    #[must_use]
    pub fn merge(self, overrides: HealthSection) -> HealthSection {
        let database = match (self.database, overrides.database) {
            (Some(base), Some(over)) => Some(DatabaseSection {
                host: over.host.or(base.host),
                port: over.port.or(base.port),
                timeout_ms: over.timeout_ms.or(base.timeout_ms),
            }),
            (base, over) => over.or(base),
        };

        HealthSection {
            required: overrides.required.or(self.required),
            optional: overrides.optional.or(self.optional),
            php_binary: overrides.php_binary.or(self.php_binary),
            php_timeout_ms: overrides.php_timeout_ms.or(self.php_timeout_ms),
            database,
        }
    }
}

/// Database endpoint whose reachability is part of health
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseTarget {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

/// Fully resolved health settings
#[derive(Debug, Clone, PartialEq)]
pub struct HealthConfig {
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub php_binary: PathBuf,
    pub php_timeout: Duration,
    /// `None` skips the database check
    pub database: Option<DatabaseTarget>,
}

impl HealthConfig {
    /// Fill unset fields with defaults
    pub fn resolve(section: HealthSection) -> Result<Self> {
        let required = section.required.map_or_else(
            || DEFAULT_REQUIRED.iter().map(ToString::to_string).collect(),
            super::clean_list,
        );
        let optional = section.optional.map_or_else(
            || DEFAULT_OPTIONAL.iter().map(ToString::to_string).collect(),
            super::clean_list,
        );

        let php_binary = section
            .php_binary
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PHP_BINARY));
        if php_binary.as_os_str().is_empty() {
            return Err(error::config::invalid("PHP binary must not be empty"));
        }

        let php_timeout_ms = section.php_timeout_ms.unwrap_or(DEFAULT_PHP_TIMEOUT_MS);
        if php_timeout_ms == 0 {
            return Err(error::config::invalid("PHP timeout must be positive"));
        }

        let database = match section.database {
            Some(db) => resolve_database(db)?,
            None => None,
        };

        Ok(Self {
            required,
            optional,
            php_binary,
            php_timeout: Duration::from_millis(php_timeout_ms),
            database,
        })
    }
}

fn resolve_database(section: DatabaseSection) -> Result<Option<DatabaseTarget>> {
    let Some(host) = section.host.map(|h| h.trim().to_string()) else {
        return Ok(None);
    };
    if host.is_empty() {
        return Ok(None);
    }

    let port = section.port.unwrap_or(DEFAULT_DB_PORT);
    if port == 0 {
        return Err(error::config::invalid("database port must not be 0"));
    }

    let timeout_ms = section.timeout_ms.unwrap_or(DEFAULT_DB_TIMEOUT_MS);
    if timeout_ms == 0 {
        return Err(error::config::invalid("database timeout must be positive"));
    }

    Ok(Some(DatabaseTarget {
        host,
        port,
        timeout: Duration::from_millis(timeout_ms),
    }))
}
