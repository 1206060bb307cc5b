// Centralized error handling for renash
// One error type for setup failures and per-file faults, with context and suggestions

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the rename pipeline
///
/// Setup variants (`UnsupportedAlgorithm`, `InvalidDigestSize`,
/// `DirectoryNotFound`) abort a run before any file is touched. The file
/// variants are produced per candidate and folded into the statistics.
#[derive(Debug)]
pub enum HashUtilityError {
    /// File system errors with context
    FileNotFound { path: PathBuf },
    DirectoryNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Hash configuration errors
    UnsupportedAlgorithm { algorithm: String },
    InvalidDigestSize { algorithm: String, size: usize, max: usize },

    /// Pattern errors
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for HashUtilityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashUtilityError::FileNotFound { path } => {
                write!(f, "File not found: {}\n", path.display())?;
                write!(f, "Suggestion: The file may have been moved or deleted during the run")
            }
            HashUtilityError::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}\n", path.display())?;
                write!(f, "Suggestion: Check that the directory path is correct and the directory exists")
            }
            HashUtilityError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} file: {}\n", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            HashUtilityError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} file {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "I/O error while {}: {}\n", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }

            HashUtilityError::UnsupportedAlgorithm { algorithm } => {
                write!(f, "Unsupported hash algorithm: {}\n", algorithm)?;
                write!(f, "Suggestion: Use --list to see available algorithms")
            }
            HashUtilityError::InvalidDigestSize { algorithm, size, max } => {
                write!(f, "Invalid digest size {} for {}\n", size, algorithm)?;
                write!(f, "Suggestion: Use a size between 1 and {} bytes", max)
            }

            HashUtilityError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid glob pattern '{}': {}\n", pattern, reason)?;
                write!(f, "Suggestion: Separate patterns with commas, e.g. \"*.jpg,*.mp4\"")
            }
        }
    }
}

impl std::error::Error for HashUtilityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashUtilityError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl HashUtilityError {
    /// Classify an io::Error raised while performing `operation` on `path`
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => HashUtilityError::FileNotFound { path: p },
            (io::ErrorKind::PermissionDenied, Some(p)) => HashUtilityError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => HashUtilityError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// Whether this error aborts a whole run rather than a single file
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            HashUtilityError::UnsupportedAlgorithm { .. }
                | HashUtilityError::InvalidDigestSize { .. }
                | HashUtilityError::DirectoryNotFound { .. }
        )
    }

    /// First line of the message, without the suggestion
    pub fn summary(&self) -> String {
        let message = self.to_string();
        message.lines().next().unwrap_or_default().to_string()
    }
}

impl From<io::Error> for HashUtilityError {
    fn from(err: io::Error) -> Self {
        HashUtilityError::from_io_error(err, "unknown operation", None)
    }
}
