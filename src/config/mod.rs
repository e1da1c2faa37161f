//! Configuration file (preflight.yaml) and layered settings
//!
//! Settings come from three layers, lowest to highest:
//! built-in defaults, the YAML config file, then CLI flags and their
//! environment variables. Each section is first collected as a set of
//! optional fields ([`PreloadSection`], [`HealthSection`]), merged, and
//! then resolved into a concrete config with every default filled in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

pub mod health;
pub mod preload;

pub use health::{DatabaseSection, DatabaseTarget, HealthConfig, HealthSection};
pub use preload::{PreloadConfig, PreloadSection};

/// Config file looked up in the current directory when none is given
pub const CONFIG_FILE: &str = "preflight.yaml";

/// Parsed preflight.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub preload: PreloadSection,

    #[serde(default)]
    pub health: HealthSection,
}

impl ConfigFile {
    /// An empty document yields the default (all fields unset)
    fn parse(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load and parse a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;

        Self::parse(&content).map_err(|e| {
            error::config::parse_failed(path.display().to_string(), e.to_string())
        })
    }

    /// Locate and load the config file
    ///
    /// An explicit path must exist. Without one, `preflight.yaml` in `cwd`
    /// is used if present; otherwise every field stays unset.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(error::config::not_found(path.display().to_string()));
            }
            tracing::debug!(path = %path.display(), "loading config file");
            return Self::load(path);
        }

        let implicit: PathBuf = cwd.join(CONFIG_FILE);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "loading config file");
            return Self::load(&implicit);
        }

        tracing::debug!("no config file, using built-in defaults");
        Ok(Self::default())
    }
}

/// Trim list entries and drop the empty ones left by stray delimiters
pub(crate) fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
