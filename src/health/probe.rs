//! Runtime capability probes
//!
//! [`RuntimeProbe`] answers the two questions the health checks ask:
//! is an extension loaded, and is a function callable. [`PhpCli`] asks a
//! real PHP binary and captures the answers in an [`Inventory`], which is
//! also what tests construct directly.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::config::health::DEFAULT_PHP_TIMEOUT_MS;
use crate::error::{PreflightError, Result};

/// Capability lookups against a PHP runtime
///
/// Names are compared case-insensitively, as PHP itself does for both
/// extension and function names.
pub trait RuntimeProbe {
    fn has_extension(&self, name: &str) -> bool;

    fn has_function(&self, name: &str) -> bool;
}

/// Snapshot of loaded extensions and callable functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    extensions: BTreeSet<String>,
    functions: BTreeSet<String>,
}

impl Inventory {
    pub fn new<E, F>(extensions: E, functions: F) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
            functions: functions
                .into_iter()
                .map(|f| f.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }
}

impl RuntimeProbe for Inventory {
    fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(&name.to_lowercase())
    }

    fn has_function(&self, name: &str) -> bool {
        self.functions.contains(&name.to_lowercase())
    }
}

/// Parse `php -m` output
///
/// Section headers such as `[PHP Modules]` and `[Zend Modules]` are
/// skipped; a module listed in both sections is kept once.
pub fn parse_module_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(ToString::to_string)
        .collect()
}

/// Probe backed by the PHP command-line binary
///
/// Each invocation is killed once `timeout` elapses, so a wedged runtime
/// fails the probe instead of hanging it.
#[derive(Debug, Clone)]
pub struct PhpCli {
    binary: PathBuf,
    timeout: Duration,
}

impl PhpCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: Duration::from_millis(DEFAULT_PHP_TIMEOUT_MS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Query loaded modules and which of `functions` exist
    pub fn inventory(&self, functions: &[&str]) -> Result<Inventory> {
        let modules = self.run(&["-m"])?;
        let extensions = parse_module_list(&modules);

        let script = function_probe_script(functions);
        let present = self.run(&["-r", &script])?;
        let functions: Vec<&str> = present
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let inventory = Inventory::new(extensions, functions);
        tracing::debug!(
            binary = %self.binary.display(),
            extensions = inventory.extension_count(),
            "collected PHP runtime inventory"
        );
        Ok(inventory)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failed(e.to_string()))?;

        let status = match child
            .wait_timeout(self.timeout)
            .map_err(|e| self.failed(e.to_string()))?
        {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.failed(format!(
                    "timed out after {} ms",
                    self.timeout.as_millis()
                )));
            }
        };

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        if let Some(mut pipe) = child.stdout.take() {
            pipe.read_to_end(&mut stdout)?;
        }
        if let Some(mut pipe) = child.stderr.take() {
            pipe.read_to_end(&mut stderr)?;
        }

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {status}"),
                message => message.to_string(),
            };
            return Err(self.failed(reason));
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn failed(&self, reason: String) -> PreflightError {
        PreflightError::ProbeFailed {
            binary: self.binary.display().to_string(),
            reason,
        }
    }
}

/// PHP snippet printing each name from `functions` that `function_exists`
fn function_probe_script(functions: &[&str]) -> String {
    let list = functions
        .iter()
        .map(|f| format!("'{}'", f.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect::<Vec<_>>()
        .join(", ");
    format!("foreach ([{list}] as $f) {{ if (function_exists($f)) {{ echo $f, PHP_EOL; }} }}")
}
