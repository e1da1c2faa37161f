//! OPcache preload list generation
//!
//! Walks the configured source roots, keeps files with the source
//! extension that match none of the exclude patterns, and renders them as
//! a PHP script of `opcache_compile_file()` calls for `opcache.preload`.
//!
//! Traversal never fails: missing roots and unreadable entries are
//! skipped. Only an invalid exclude pattern is rejected, before any
//! directory is read.

pub mod exclude;
pub mod manifest;
pub mod scan;

pub use exclude::ExcludeSet;
pub use manifest::Manifest;

use crate::config::PreloadConfig;
use crate::error::Result;

/// Scan the configured roots and build the manifest
pub fn generate(config: &PreloadConfig) -> Result<Manifest> {
    let exclude = ExcludeSet::new(&config.exclude)?;
    tracing::debug!(
        roots = config.roots.len(),
        patterns = exclude.len(),
        extension = %config.extension,
        "generating preload manifest"
    );

    let files = scan::collect(&config.roots, &config.extension, &exclude);
    Ok(Manifest::new(files))
}
