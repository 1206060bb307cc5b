// File I/O collaborator for the rename pipeline
// Content reading, candidate checks, write-access checks and renames

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::error::HashUtilityError;

// Files at or above this size are read through the buffered path
const MMAP_THRESHOLD: u64 = 2 * 1024 * 1024 * 1024; // 2GB

/// Feed the full content of a file to `on_chunk`
///
/// Files smaller than 2GB are memory mapped and passed in one slice; empty
/// files, larger files and files that cannot be mapped are streamed in
/// `buffer_size` chunks, so memory use stays bounded.
///
/// # Safety
///
/// Memory mapping assumes the file is not modified by another process while it
/// is being hashed. A concurrent writer can make the digest inconsistent.
pub fn stream_contents<F>(
    path: &Path,
    buffer_size: usize,
    mut on_chunk: F,
) -> Result<(), HashUtilityError>
where
    F: FnMut(&[u8]),
{
    let file = File::open(path).map_err(|e| {
        HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf()))
    })?;

    let file_size = file
        .metadata()
        .map_err(|e| HashUtilityError::from_io_error(e, "reading metadata", Some(path.to_path_buf())))?
        .len();

    if file_size > 0 && file_size < MMAP_THRESHOLD {
        if let Ok(mmap) = unsafe { Mmap::map(&file) } {
            on_chunk(&mmap[..]);
            return Ok(());
        }
    }

    stream_buffered(file, path, buffer_size, on_chunk)
}

fn stream_buffered<F>(
    mut file: File,
    path: &Path,
    buffer_size: usize,
    mut on_chunk: F,
) -> Result<(), HashUtilityError>
where
    F: FnMut(&[u8]),
{
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| {
            HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf()))
        })?;
        if bytes_read == 0 {
            break;
        }
        on_chunk(&buffer[..bytes_read]);
    }

    Ok(())
}

/// Whether `path` currently names an existing regular file
///
/// Symlinks are followed, so a link to a file counts and a broken link does not.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Whether the current user may write to `path`
///
/// On Unix this asks access(2), so it follows the effective user's real rights
/// (root may write to a 0444 file).
#[cfg(unix)]
pub fn has_write_access(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
pub fn has_write_access(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

/// Rename `from` to `to`, classifying failures with the "renaming" operation
pub fn rename_file(from: &Path, to: &Path) -> Result<(), HashUtilityError> {
    fs::rename(from, to).map_err(|e| {
        HashUtilityError::from_io_error(e, "renaming", Some(from.to_path_buf()))
    })
}
