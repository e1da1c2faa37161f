//! Common test utilities for Preflight integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Environment variables that would otherwise leak host settings into a run
const ENV_VARS: &[&str] = &[
    "PREFLIGHT_CONFIG",
    "PREFLIGHT_PROJECT_ROOT",
    "PREFLIGHT_PRELOAD_OUTPUT",
    "PREFLIGHT_REQUIRED_EXTENSIONS",
    "PREFLIGHT_OPTIONAL_EXTENSIONS",
    "PHP_BINARY",
    "DB_HOST",
    "DB_PORT",
    "RUST_LOG",
];

/// A temporary project directory for integration tests
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = canonical_path(temp.path());
        Self { temp, path }
    }

    /// Write a file in the project, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write an executable stand-in for the php CLI
    ///
    /// `php -m` lists `modules`; any other invocation prints `functions`,
    /// as the function probe script would.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn fake_php(&self, modules: &[&str], functions: &[&str]) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from("#!/bin/sh\nif [ \"$1\" = \"-m\" ]; then\ncat <<'EOF'\n[PHP Modules]\n");
        for module in modules {
            script.push_str(module);
            script.push('\n');
        }
        script.push_str("EOF\nelse\ncat <<'EOF'\n");
        for function in functions {
            script.push_str(function);
            script.push('\n');
        }
        script.push_str("EOF\nfi\n");

        let path = self.write_file("bin/php", &script);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake php executable");
        path
    }
}

/// Resolve symlinks in the temp path (e.g. /tmp -> /private/tmp on macOS)
fn canonical_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Command for the real preflight binary, run inside `dir` with a clean environment
#[allow(deprecated)]
pub fn preflight_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("preflight").expect("Failed to find preflight binary");
    cmd.current_dir(dir);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}
