//! Version command implementation
//!
//! Unlike `--version`, this also prints the built-in defaults a container
//! image runs with when neither preflight.yaml nor flags override them.

use std::fmt::Write as _;

use crate::config::{CONFIG_FILE, health, preload};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

fn render() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "preflight {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Build info:");
    let _ = writeln!(out, "  Minimum Rust: {}", env!("CARGO_PKG_RUST_VERSION"));
    let _ = writeln!(
        out,
        "  Profile: {}",
        if cfg!(debug_assertions) { "debug" } else { "release" }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Defaults:");
    let _ = writeln!(out, "  Config file: ./{CONFIG_FILE}");
    let _ = writeln!(out, "  Project root: {}", preload::DEFAULT_PROJECT_ROOT);
    let _ = writeln!(out, "  Preload output: {}", preload::DEFAULT_OUTPUT);
    let _ = writeln!(out, "  Source roots: {}", preload::DEFAULT_ROOTS.join(", "));
    let _ = writeln!(out, "  Required extensions: {}", health::DEFAULT_REQUIRED.join(", "));
    let _ = writeln!(out, "  Optional extensions: {}", health::DEFAULT_OPTIONAL.join(", "));
    let _ = writeln!(
        out,
        "  PHP binary: {} ({} ms timeout)",
        health::DEFAULT_PHP_BINARY,
        health::DEFAULT_PHP_TIMEOUT_MS
    );
    out
}
