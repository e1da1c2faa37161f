use clap::Parser;
use std::path::PathBuf;

/// Arguments for the preload command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Generate with built-in defaults (/var/www/html):\n    preflight preload\n\n\
                   Generate for a checkout in the current directory:\n    preflight preload --project-root .\n\n\
                   Scan custom roots:\n    preflight preload --root app --root vendor/symfony --exclude '*/Tests/*'\n\n\
                   Preview without writing:\n    preflight preload --dry-run --list")]
pub struct PreloadArgs {
    /// Application root; relative roots and output are resolved against it
    #[arg(long, value_name = "DIR", env = "PREFLIGHT_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Where to write the preload script
    #[arg(long, short = 'o', value_name = "FILE", env = "PREFLIGHT_PRELOAD_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Source root to scan (repeatable; replaces the configured roots)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// fnmatch pattern excluding matching paths, `*` crosses `/` (repeatable; replaces the configured patterns)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Source file extension
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Scan and report without writing the script
    #[arg(long)]
    pub dry_run: bool,

    /// Print every preloaded path after the summary
    #[arg(long)]
    pub list: bool,
}
