//! Preload generator settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Application root inside the PHP container image
pub const DEFAULT_PROJECT_ROOT: &str = "/var/www/html";

/// Preload script location, relative to the project root
pub const DEFAULT_OUTPUT: &str = "config/opcache-preload.php";

/// Source roots scanned by default, relative to the project root
pub const DEFAULT_ROOTS: &[&str] = &["vendor/laravel/framework/src", "vendor/symfony", "app", "config"];

/// Paths never worth preloading: test suites, VCS metadata and framework test helpers
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "*/Tests/*",
    "*/tests/*",
    "*/Test/*",
    "*/test/*",
    "*/.git/*",
    "*/vendor/laravel/framework/src/Illuminate/Foundation/Testing/*",
];

pub const DEFAULT_EXTENSION: &str = "php";

/// `preload:` section of preflight.yaml, or the equivalent CLI flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreloadSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl PreloadSection {
    /// Layer `overrides` on top of `self`; every set field in `overrides` wins
    #[must_use]
    pub fn merge(self, overrides: PreloadSection) -> PreloadSection {
        PreloadSection {
            project_root: overrides.project_root.or(self.project_root),
            output: overrides.output.or(self.output),
            roots: overrides.roots.or(self.roots),
            exclude: overrides.exclude.or(self.exclude),
            extension: overrides.extension.or(self.extension),
        }
    }
}

/// Fully resolved preload settings
#[derive(Debug, Clone, PartialEq)]
pub struct PreloadConfig {
    pub project_root: PathBuf,
    /// Absolute path of the generated script
    pub output: PathBuf,
    /// Absolute source roots, in scan order
    pub roots: Vec<PathBuf>,
    pub exclude: Vec<String>,
    /// Source extension without the leading dot
    pub extension: String,
}

impl PreloadConfig {
    /// Fill unset fields with defaults and anchor relative paths at the project root
    ///
    /// A relative project root is resolved against `cwd` and must exist.
    pub fn resolve(section: PreloadSection, cwd: &Path) -> Result<Self> {
        let project_root = section
            .project_root
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_ROOT));

        let project_root = if project_root.is_absolute() {
            project_root
        } else {
            dunce::canonicalize(cwd.join(&project_root)).map_err(|e| {
                error::config::invalid(format!(
                    "project root '{}' cannot be resolved: {}",
                    project_root.display(),
                    e
                ))
            })?
        };

        let output = anchor(
            &project_root,
            section
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        );

        let roots = section
            .roots
            .unwrap_or_else(|| DEFAULT_ROOTS.iter().map(PathBuf::from).collect())
            .into_iter()
            .map(|root| anchor(&project_root, root))
            .collect();

        let exclude = section.exclude.map_or_else(
            || DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            super::clean_list,
        );

        let extension = section
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
            .trim()
            .trim_start_matches('.')
            .to_string();

        if extension.is_empty() {
            return Err(error::config::invalid("source extension must not be empty"));
        }

        Ok(Self {
            project_root,
            output,
            roots,
            exclude,
            extension,
        })
    }
}

fn anchor(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
