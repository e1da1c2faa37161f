//! File system errors

use std::path::Path;

use super::PreflightError;

/// Creates a file write failed error
pub fn write_failed(path: &Path, reason: impl ToString) -> PreflightError {
    PreflightError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
