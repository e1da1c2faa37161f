//! Preload manifest and its PHP script form

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use super::scan::CandidateFile;
use crate::error::{self, Result};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Ordered list of files to preload, with aggregate size
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<CandidateFile>,
}

impl Manifest {
    pub fn new(entries: Vec<CandidateFile>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CandidateFile] {
        &self.entries
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Total size in MiB rounded to two decimals, halves away from zero
    ///
    /// Formatting with `{:.2}` alone would round exact ties to even.
    #[allow(clippy::cast_precision_loss)]
    pub fn total_size_mib(&self) -> f64 {
        let mib = self.total_size_bytes() as f64 / BYTES_PER_MIB;
        (mib * 100.0).round() / 100.0
    }

    /// Render the preload script
    ///
    /// Error reporting is switched off first so that a single file failing
    /// to compile does not abort PHP startup.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let mut script = String::new();
        script.push_str("<?php\n\n");
        script.push_str("/**\n");
        script.push_str(" * OPcache preload file\n");
        let _ = writeln!(
            script,
            " * Generated at: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(script, " * Files: {}", self.file_count());
        script.push_str(" */\n\n");
        script.push_str("// Ignore errors during preload\n");
        script.push_str("error_reporting(0);\n\n");

        for entry in &self.entries {
            let _ = writeln!(
                script,
                "opcache_compile_file('{}');",
                php_single_quoted(&entry.path.to_string_lossy())
            );
        }

        script
    }

    /// Write the rendered script to `output`, replacing any existing file
    pub fn write(&self, output: &Path, generated_at: NaiveDateTime) -> Result<()> {
        fs::write(output, self.render(generated_at))
            .map_err(|e| error::fs::write_failed(output, e))
    }
}

/// Escape text for the inside of a PHP single-quoted string literal
fn php_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
