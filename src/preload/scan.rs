//! Source tree traversal

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::exclude::ExcludeSet;

/// A source file accepted for preloading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Collect every file below `roots` with `extension` that no exclude pattern matches
///
/// Roots are visited in the given order and each tree is walked sorted by
/// file name, so the result is stable for an unchanged file system. Roots
/// that are not directories and entries that cannot be read are skipped.
pub fn collect(roots: &[PathBuf], extension: &str, exclude: &ExcludeSet) -> Vec<CandidateFile> {
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "skipping missing source root");
            continue;
        }

        let before = files.len();
        scan_root(root, extension, exclude, &mut files);
        tracing::debug!(
            root = %root.display(),
            accepted = files.len() - before,
            "scanned source root"
        );
    }

    files
}

fn scan_root(root: &Path, extension: &str, exclude: &ExcludeSet, files: &mut Vec<CandidateFile>) {
    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        });

    for entry in entries {
        if !is_source_file(&entry, extension) {
            continue;
        }

        let path = entry.path();
        if let Some(pattern) = exclude.first_match(path) {
            tracing::trace!(path = %path.display(), pattern, "excluded");
            continue;
        }

        match fs::metadata(path) {
            Ok(metadata) => files.push(CandidateFile {
                path: path.to_path_buf(),
                size_bytes: metadata.len(),
            }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            }
        }
    }
}

/// Regular file (or a symlink to one) whose extension equals `extension` exactly
fn is_source_file(entry: &DirEntry, extension: &str) -> bool {
    let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());

    is_file && entry.path().extension().and_then(OsStr::to_str) == Some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn exclude(patterns: &[&str]) -> ExcludeSet {
        let patterns: Vec<String> = patterns.iter().map(ToString::to_string).collect();
        ExcludeSet::new(&patterns).unwrap()
    }

    fn paths(files: &[CandidateFile]) -> Vec<PathBuf> {
        files.iter().map(|f| f.path.clone()).collect()
    }

    #[test]
    fn test_excludes_tests_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let kept = write(&src, "a.ext", "a");
        write(&src, "tests/b.ext", "b");

        let files = collect(&[src], "ext", &exclude(&["*/tests/*"]));
        assert_eq!(paths(&files), vec![kept]);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let kept = write(&src, "a.php", "<?php");

        let files = collect(
            &[temp.path().join("does-not-exist"), src],
            "php",
            &exclude(&[]),
        );
        assert_eq!(paths(&files), vec![kept]);
    }

    #[test]
    fn test_root_that_is_a_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "lonely.php", "<?php");

        let files = collect(&[file], "php", &exclude(&[]));
        assert!(files.is_empty());
    }

    #[test]
    fn test_extension_match_is_exact_and_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let kept = write(temp.path(), "a.php", "");
        write(temp.path(), "b.PHP", "");
        write(temp.path(), "c.phpx", "");
        write(temp.path(), "d.php.bak", "");
        write(temp.path(), "php", "");

        let files = collect(&[temp.path().to_path_buf()], "php", &exclude(&[]));
        assert_eq!(paths(&files), vec![kept]);
    }

    #[test]
    fn test_directories_with_extension_are_not_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("weird.php")).unwrap();
        let kept = write(temp.path(), "weird.php/inner.php", "");

        let files = collect(&[temp.path().to_path_buf()], "php", &exclude(&[]));
        assert_eq!(paths(&files), vec![kept]);
    }

    #[test]
    fn test_sizes_are_recorded() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.php", "12345");
        write(temp.path(), "nested/b.php", "123");

        let files = collect(&[temp.path().to_path_buf()], "php", &exclude(&[]));
        let total: u64 = files.iter().map(|f| f.size_bytes).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_order_is_sorted_and_roots_keep_their_order() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("z-first");
        let second = temp.path().join("a-second");
        let b = write(&first, "b.php", "");
        let a = write(&first, "a.php", "");
        let c = write(&second, "c.php", "");

        let files = collect(&[first, second], "php", &exclude(&[]));
        assert_eq!(paths(&files), vec![a, b, c]);
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let temp = TempDir::new().unwrap();
        for name in ["m.php", "a/x.php", "a/tests/t.php", "q/r/s.php"] {
            write(temp.path(), name, name);
        }
        let roots = [temp.path().to_path_buf()];
        let exclude = exclude(&["*/tests/*"]);

        assert_eq!(
            collect(&roots, "php", &exclude),
            collect(&roots, "php", &exclude)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_included() {
        let temp = TempDir::new().unwrap();
        let target = write(temp.path(), "outside/real.php", "abc");
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        std::os::unix::fs::symlink(&target, src.join("link.php")).unwrap();

        let files = collect(&[src.clone()], "php", &exclude(&[]));
        assert_eq!(
            files,
            vec![CandidateFile {
                path: src.join("link.php"),
                size_bytes: 3,
            }]
        );
    }
}
