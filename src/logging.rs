//! Diagnostic logging setup.
//!
//! Status lines for the user are printed directly; this subscriber only carries
//! `tracing` diagnostics to stderr, filtered through `RUST_LOG`.

use std::fmt;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug)]
pub enum LoggingError {
    /// Another global subscriber was installed first.
    SetGlobal(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoggingError::SetGlobal(reason) => {
                write!(f, "Failed to install global tracing subscriber: {}", reason)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

/// Install the stderr subscriber.
///
/// Subsequent calls are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::SetGlobal(e.to_string()))?;
    let _ = INITIALIZED.set(());

    tracing::debug!("logging initialized");
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
