// Wildcard pattern expansion module
// Expands file name globs relative to the base directory using glob

use std::path::{Path, PathBuf};

use glob::MatchOptions;

use super::error::HashUtilityError;

/// Default pattern: every file with an extension
pub const DEFAULT_PATTERN: &str = "*.*";

// Shell-like matching: wildcards never match a leading dot or a separator
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Split a comma separated pattern string
///
/// Surrounding whitespace is trimmed and empty entries are dropped. An input
/// with no usable entry yields the default pattern.
pub fn split_patterns(patterns: &str) -> Vec<String> {
    let list: Vec<String> = patterns
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if list.is_empty() {
        vec![DEFAULT_PATTERN.to_string()]
    } else {
        list
    }
}

/// Build the full glob for `pattern` under `base`
///
/// The base directory is escaped so its own `*`, `?` or `[` are literal.
/// Recursive mode inserts a `**` component that matches any depth, including
/// the base itself. Absolute patterns are used as given.
pub fn build_pattern(base: &Path, pattern: &str, recursive: bool) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }

    let mut full = PathBuf::from(glob::Pattern::escape(&base.to_string_lossy()));
    if recursive {
        full.push("**");
    }
    full.push(pattern);
    full.to_string_lossy().into_owned()
}

/// Expand one pattern into its current matches, sorted
///
/// Matches are collected before returning, so renames made while processing
/// them cannot feed back into the same expansion. Entries that cannot be read
/// during the walk are logged and skipped.
///
/// # Errors
/// Returns `InvalidPattern` if the glob cannot be compiled
pub fn expand_pattern(
    base: &Path,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, HashUtilityError> {
    let full = build_pattern(base, pattern, recursive);

    let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| HashUtilityError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e.error(), "unreadable glob entry");
            }
        }
    }

    // Sort matches for consistent ordering
    matches.sort();

    Ok(matches)
}

// Tests in tests/rename/utility_tests.rs
