//! Error types and handling for Preflight
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Health findings are never errors: a missing extension is data in a
//! [`HealthReport`](crate::health::HealthReport). The variants here cover
//! configuration, file system and probe failures only.
//!
//! Constructors are grouped by domain:
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Preflight operations
#[derive(Error, Diagnostic, Debug)]
pub enum PreflightError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(preflight::config::not_found),
        help("Pass --config with an existing file or unset PREFLIGHT_CONFIG")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(preflight::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(preflight::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(preflight::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(preflight::preload::invalid_pattern),
        help("Exclude patterns use shell glob syntax, e.g. '*/tests/*'")
    )]
    InvalidPattern { pattern: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(
        code(preflight::fs::write_failed),
        help("Check that the parent directory exists and is writable")
    )]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(preflight::fs::io_error))]
    IoError { message: String },

    // Probe errors
    #[error("Failed to query PHP runtime '{binary}': {reason}")]
    #[diagnostic(
        code(preflight::health::probe_failed),
        help("Set PHP_BINARY or pass --php-binary with the path to the php CLI")
    )]
    ProbeFailed { binary: String, reason: String },
}

impl From<std::io::Error> for PreflightError {
    fn from(err: std::io::Error) -> Self {
        PreflightError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PreflightError {
    fn from(err: serde_json::Error) -> Self {
        PreflightError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PreflightError>;
