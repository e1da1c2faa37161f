//! Health findings and the report printed for the orchestrator

use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::Result;

/// How much a failed check matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A required capability is missing; the runtime cannot serve
    Error,
    /// Degraded but serviceable: optional capability absent or not functional
    Warning,
}

/// A classified result of one failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Healthy,
    Unhealthy,
}

impl Status {
    /// Process exit code the orchestrator acts on
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Healthy => 0,
            Status::Unhealthy => 1,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Healthy => write!(f, "HEALTHY"),
            Status::Unhealthy => write!(f, "UNHEALTHY"),
        }
    }
}

/// Errors and warnings collected by one health run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    status: Status,
    errors: &'a [String],
    warnings: &'a [String],
}

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding.message),
            Severity::Warning => self.warnings.push(finding.message),
        }
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Unhealthy iff at least one error was recorded
    pub fn status(&self) -> Status {
        if self.errors.is_empty() {
            Status::Healthy
        } else {
            Status::Unhealthy
        }
    }

    /// Plain-text report: status line, then `Errors:` and `Warnings:` sections when non-empty
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.status());
        render_section(&mut out, "Errors:", &self.errors);
        render_section(&mut out, "Warnings:", &self.warnings);
        out
    }

    pub fn render_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&ReportJson {
            status: self.status(),
            errors: &self.errors,
            warnings: &self.warnings,
        })?;
        Ok(json)
    }
}

fn render_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(title);
    out.push('\n');
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}
