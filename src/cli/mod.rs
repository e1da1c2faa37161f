//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - preload: Preload command arguments
//! - health: Health command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod health;
pub mod preload;

pub use completions::CompletionsArgs;
pub use health::HealthArgs;
pub use preload::PreloadArgs;

/// Preflight - PHP container startup and health tooling
///
/// Generate the OPcache preload script and verify the PHP runtime.
#[derive(Parser, Debug)]
#[command(
    name = "preflight",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "OPcache preload generation and runtime health checks for PHP containers",
    long_about = "Preflight generates the OPcache preload script for a PHP application at image build \
                  or startup time, and verifies the PHP runtime (extensions, OPcache, PHP-FPM, database) \
                  as a container health probe.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  preflight preload                         \x1b[90m# Write config/opcache-preload.php\x1b[0m\n   \
                  preflight preload --dry-run --list        \x1b[90m# Show what would be preloaded\x1b[0m\n   \
                  preflight health                          \x1b[90m# Exit 0 if healthy, 1 otherwise\x1b[0m\n   \
                  preflight health --require pdo,intl       \x1b[90m# Override required extensions\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ./preflight.yaml when present)
    #[arg(long, short = 'c', global = true, env = "PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the OPcache preload script
    Preload(PreloadArgs),

    /// Verify the PHP runtime and report HEALTHY or UNHEALTHY
    Health(HealthArgs),

    /// Show version, build info and built-in defaults
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
