// Name heuristic for quick runs
// Guesses whether a file name is already a digest of the configured algorithm

use std::path::Path;

use super::hash::Algorithm;
use super::path_utils;

/// Whether `stem` looks like a hex digest produced by `algorithm`
///
/// This only checks shape, never content: any hex name of a plausible length
/// passes, so a file that merely happens to be named like a digest is skipped
/// by quick runs.
///
/// Fixed-length algorithms need exactly `2 * digest_len()` hex characters.
/// Variable-length algorithms need exactly `2 * size` when a size is given,
/// otherwise any non-zero even length up to `2 * digest_len()`.
pub fn looks_like_hash(stem: &str, algorithm: Algorithm, digest_size: Option<usize>) -> bool {
    let len = stem.chars().count();
    if len % 2 != 0 {
        return false;
    }
    let byte_len = len / 2;

    let has_expected_length = if algorithm.is_variable_length() {
        match digest_size {
            Some(size) => byte_len == size,
            None => byte_len > 0 && byte_len <= algorithm.digest_len(),
        }
    } else {
        byte_len == algorithm.digest_len()
    };

    has_expected_length && stem.chars().all(|c| c.is_ascii_hexdigit())
}

/// `looks_like_hash` applied to the file name of `path` minus its extension
pub fn path_looks_like_hash(path: &Path, algorithm: Algorithm, digest_size: Option<usize>) -> bool {
    looks_like_hash(&path_utils::file_stem_lossy(path), algorithm, digest_size)
}
