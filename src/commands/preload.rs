//! Preload command implementation

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::PreloadArgs;
use crate::config::{ConfigFile, PreloadConfig, PreloadSection};
use crate::error::Result;
use crate::preload::{self, Manifest};

/// Run preload command
pub fn run(config_path: Option<PathBuf>, args: PreloadArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file = ConfigFile::discover(config_path.as_deref(), &cwd)?;
    let config = PreloadConfig::resolve(file.preload.merge(overrides(&args)), &cwd)?;

    let manifest = preload::generate(&config)?;

    if !args.dry_run {
        manifest.write(&config.output, Local::now().naive_local())?;
    }

    print!("{}", summary(&config.output, &manifest, args.dry_run));

    if args.list {
        for entry in manifest.entries() {
            println!("{}", entry.path.display());
        }
    }

    Ok(())
}

/// CLI flags as the top configuration layer; empty lists leave the lower layer in place
fn overrides(args: &PreloadArgs) -> PreloadSection {
    PreloadSection {
        project_root: args.project_root.clone(),
        output: args.output.clone(),
        roots: (!args.roots.is_empty()).then(|| args.roots.clone()),
        exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
        extension: args.extension.clone(),
    }
}

/// Three-line summary: output path, file count, total size in MiB
fn summary(output: &Path, manifest: &Manifest, dry_run: bool) -> String {
    let mut out = String::new();
    if dry_run {
        let _ = writeln!(out, "Preload file (dry run): {}", output.display());
    } else {
        let _ = writeln!(out, "Preload file generated: {}", output.display());
    }
    let _ = writeln!(out, "Files to preload: {}", manifest.file_count());
    let _ = writeln!(out, "Total size: {:.2} MB", manifest.total_size_mib());
    out
}
