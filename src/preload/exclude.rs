//! Exclude patterns with `fnmatch` semantics
//!
//! Patterns are matched against the full candidate path, and `*` also
//! matches path separators, so `*/tests/*` excludes any file below a
//! `tests` directory at any depth.
//!
//! Patterns are rewritten before compiling so that globset behaves like
//! `fnmatch`: braces are literal, an unclosed `[` is a literal bracket and
//! a run of stars is a single `*`.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{PreflightError, Result};

/// Compiled exclude patterns, kept in configured order
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    patterns: Vec<(String, GlobMatcher)>,
}

impl ExcludeSet {
    /// Compile every pattern, failing on the first invalid one
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let matcher = GlobBuilder::new(&fnmatch_to_glob(pattern))
                    .literal_separator(false)
                    .backslash_escape(true)
                    .build()
                    .map_err(|e| PreflightError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.kind().to_string(),
                    })?
                    .compile_matcher();
                Ok((pattern.clone(), matcher))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// First pattern matching `path`, if any
    pub fn first_match(&self, path: &Path) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, matcher)| matcher.is_match(path))
            .map(|(pattern, _)| pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Rewrite an `fnmatch` pattern into equivalent globset syntax
fn fnmatch_to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => match chars.get(i + 1) {
                Some(&next) => {
                    glob.push('\\');
                    glob.push(next);
                    i += 2;
                    continue;
                }
                None => glob.push_str("\\\\"),
            },
            // `**` would otherwise match across whole directories
            '*' => {
                glob.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '{' | '}' => {
                glob.push('\\');
                glob.push(chars[i]);
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    glob.extend(&chars[i..=end]);
                    i = end + 1;
                    continue;
                }
                None => glob.push_str("\\["),
            },
            c => glob.push(c),
        }
        i += 1;
    }

    glob
}

/// Index of the `]` closing the bracket expression opened at `start`
///
/// A `]` directly after `[` or `[!` belongs to the set.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if matches!(chars.get(j), Some('!' | '^')) {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> ExcludeSet {
        let patterns: Vec<String> = patterns.iter().map(ToString::to_string).collect();
        ExcludeSet::new(&patterns).unwrap()
    }

    #[test]
    fn test_star_crosses_separators() {
        let exclude = set(&["*/tests/*"]);
        assert!(exclude.first_match(Path::new("/src/tests/b.php")).is_some());
        assert!(exclude.first_match(Path::new("/src/deep/tests/unit/c.php")).is_some());
        assert!(exclude.first_match(Path::new("/src/a.php")).is_none());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let exclude = set(&["*/tests/*"]);
        assert!(exclude.first_match(Path::new("/src/Tests/b.php")).is_none());
    }

    #[test]
    fn test_directory_name_must_match_whole_component_text() {
        let exclude = set(&["*/test/*"]);
        assert!(exclude.first_match(Path::new("/src/testing/a.php")).is_none());
        assert!(exclude.first_match(Path::new("/src/test/a.php")).is_some());
    }

    #[test]
    fn test_hidden_directories_match() {
        let exclude = set(&["*/.git/*"]);
        assert!(exclude.first_match(Path::new("/repo/.git/hooks/x.php")).is_some());
    }

    #[test]
    fn test_first_match_reports_pattern_in_order() {
        let exclude = set(&["*/Tests/*", "*.php", "*/Tests/Unit/*"]);
        assert_eq!(
            exclude.first_match(Path::new("/v/Tests/Unit/a.php")),
            Some("*/Tests/*")
        );
    }

    #[test]
    fn test_membership_is_independent_of_pattern_order() {
        let forward = set(&["*/tests/*", "*/Fixtures/*"]);
        let reverse = set(&["*/Fixtures/*", "*/tests/*"]);
        for path in [
            "/a/tests/x.php",
            "/a/Fixtures/y.php",
            "/a/src/z.php",
            "/a/tests/Fixtures/w.php",
        ] {
            assert_eq!(
                forward.first_match(Path::new(path)).is_some(),
                reverse.first_match(Path::new(path)).is_some(),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let exclude = set(&[]);
        assert_eq!(exclude.len(), 0);
        assert!(exclude.first_match(Path::new("/anything.php")).is_none());
    }

    #[test]
    fn test_braces_are_literal() {
        let exclude = set(&["*/{a,b}/*"]);
        assert!(exclude.first_match(Path::new("/src/{a,b}/x.php")).is_some());
        assert!(exclude.first_match(Path::new("/src/a/x.php")).is_none());
        assert!(exclude.first_match(Path::new("/src/b/x.php")).is_none());
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let exclude = set(&["*/[old/*"]);
        assert!(exclude.first_match(Path::new("/src/[old/x.php")).is_some());
        assert!(exclude.first_match(Path::new("/src/old/x.php")).is_none());
    }

    #[test]
    fn test_bracket_expressions() {
        let exclude = set(&["*/[Tt]ests/*", "*/[!a-z]*.inc.php"]);
        assert!(exclude.first_match(Path::new("/v/Tests/a.php")).is_some());
        assert!(exclude.first_match(Path::new("/v/tests/a.php")).is_some());
        assert!(exclude.first_match(Path::new("/v/Legacy.inc.php")).is_some());
        assert!(exclude.first_match(Path::new("/v/legacy.php")).is_none());
    }

    #[test]
    fn test_double_star_is_plain_star() {
        let exclude = set(&["*/**/x.php"]);
        assert!(exclude.first_match(Path::new("/a/b/x.php")).is_some());
        assert!(exclude.first_match(Path::new("/x.php")).is_none());
    }

    #[test]
    fn test_escaped_characters_are_literal() {
        let exclude = set(&["*/\\*.php"]);
        assert!(exclude.first_match(Path::new("/src/*.php")).is_some());
        assert!(exclude.first_match(Path::new("/src/a.php")).is_none());
    }

    #[test]
    fn test_fnmatch_to_glob() {
        assert_eq!(fnmatch_to_glob("*/tests/*"), "*/tests/*");
        assert_eq!(fnmatch_to_glob("*/{a,b}/*"), "*/\\{a,b\\}/*");
        assert_eq!(fnmatch_to_glob("*/[old/*"), "*/\\[old/*");
        assert_eq!(fnmatch_to_glob("[]x]**"), "[]x]*");
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let result = ExcludeSet::new(&["*/[z-a]/*".to_string()]);
        assert!(matches!(
            result,
            Err(PreflightError::InvalidPattern { .. })
        ));
    }
}
