// Path utilities for the rename pipeline
// Absolute base resolution, extension handling and relative display paths

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory without touching symlinks
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(clean_path(&joined))
}

/// Clean a path by removing redundant components like "." and ".."
/// This provides a normalized form without requiring the path to exist
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // ".." directly under the root stays at the root
                Some(Component::RootDir) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    let result: PathBuf = components.iter().collect();
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// File name without its extension, lossily decoded
pub fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extension of `path` including its leading dot, or empty
///
/// A trailing dot is kept as an empty extension ("name." gives ".").
pub fn extension_with_dot(path: &Path) -> OsString {
    let mut ext = OsString::new();
    if let Some(e) = path.extension() {
        ext.push(".");
        ext.push(e);
    }
    ext
}

/// Target file name for a file whose content hashes to `digest`
pub fn hashed_file_name(path: &Path, digest: &str) -> OsString {
    let mut name = OsString::from(digest);
    name.push(extension_with_dot(path));
    name
}

/// Path of `path` relative to `base` for display, or `path` itself
pub fn display_relative(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Final component of `path`, or an empty name
pub fn file_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or_default()
}

// Tests in tests/rename/utility_tests.rs
