// Rename engine
// Drives pattern expansion, the quick-run heuristic, hashing and renaming per file

use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, info, warn};

use super::config::RenameConfig;
use super::error::HashUtilityError;
use super::file_io;
use super::hash::HashComputer;
use super::heuristic;
use super::path_utils;
use super::stats::RenameStats;
use super::wildcard;

/// Terminal outcome of one candidate file
///
/// Paths are relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    /// Quick run: the name already looks like a digest, content not read
    SkippedQuick { path: PathBuf },
    /// The content digest matches the current name
    AlreadyFormatted { path: PathBuf },
    /// The content could not be read or hashed
    Unreadable { path: PathBuf, reason: String },
    /// The file was renamed
    Renamed { from: PathBuf, to: PathBuf },
    /// Dry run: the file would be renamed
    WouldRename { from: PathBuf, to: PathBuf },
    /// The rename itself failed
    RenameFailed { from: PathBuf, to: PathBuf, reason: String },
    /// Dry run: the file is not writable, so the rename would fail
    NotWritable { from: PathBuf, to: PathBuf },
}

impl RenameEvent {
    /// Skips are only reported in verbose mode
    pub fn is_verbose_only(&self) -> bool {
        matches!(self, RenameEvent::SkippedQuick { .. } | RenameEvent::AlreadyFormatted { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RenameEvent::Unreadable { .. }
                | RenameEvent::RenameFailed { .. }
                | RenameEvent::NotWritable { .. }
        )
    }
}

impl fmt::Display for RenameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenameEvent::SkippedQuick { path } => write!(
                f,
                "Quick: File name {} seems already properly named. Skipping",
                path.display()
            ),
            RenameEvent::AlreadyFormatted { path } => write!(
                f,
                "File name {} is already properly formatted. Skipping",
                path.display()
            ),
            RenameEvent::Unreadable { path, reason } => {
                write!(f, "Could not hash file {} ({}). Skipping", path.display(), reason)
            }
            RenameEvent::Renamed { from, to } => {
                write!(f, "Renamed {} to {}", from.display(), to.display())
            }
            RenameEvent::WouldRename { from, to } => {
                write!(f, "Would rename {} to {}", from.display(), to.display())
            }
            RenameEvent::RenameFailed { from, to, reason } => write!(
                f,
                "Error occurred while renaming {} to {}: {}",
                from.display(),
                to.display(),
                reason
            ),
            RenameEvent::NotWritable { from, to } => {
                write!(f, "Could not rename {} to {}", from.display(), to.display())
            }
        }
    }
}

/// Engine that renames matching files to the digest of their content
pub struct RenameEngine {
    config: RenameConfig,
    computer: HashComputer,
}

impl RenameEngine {
    pub fn new(config: RenameConfig) -> Self {
        Self {
            config,
            computer: HashComputer::new(),
        }
    }

    /// Run over every pattern, printing each outcome
    ///
    /// Skips are printed only in verbose mode; failures go to stderr.
    pub fn run(&self) -> Result<RenameStats, HashUtilityError> {
        let verbose = self.config.verbose();
        self.run_with(|event| print_event(event, verbose))
    }

    /// Run over every pattern, handing each candidate's outcome to `on_event`
    ///
    /// Per-file failures never abort the run. An error is returned only when
    /// the run cannot start, in which case no file has been touched.
    pub fn run_with<F>(&self, mut on_event: F) -> Result<RenameStats, HashUtilityError>
    where
        F: FnMut(&RenameEvent),
    {
        let base = self.config.base_dir();
        if !base.is_dir() {
            return Err(HashUtilityError::DirectoryNotFound { path: base.to_path_buf() });
        }

        info!(
            base = %base.display(),
            algorithm = %self.config.algorithm(),
            digest_size = ?self.config.digest_size(),
            dry_run = self.config.dry_run(),
            "starting rename run"
        );

        let mut stats = RenameStats::new();

        for pattern in self.config.patterns() {
            let candidates = match wildcard::expand_pattern(base, pattern, self.config.recursive()) {
                Ok(candidates) => candidates,
                Err(e) => {
                    eprintln!("Warning: {}", e.summary());
                    warn!(pattern = %pattern, error = %e.summary(), "skipping pattern");
                    continue;
                }
            };
            debug!(pattern = %pattern, matches = candidates.len(), "expanded pattern");

            for path in candidates {
                if !file_io::is_regular_file(&path) {
                    debug!(path = %path.display(), "not a regular file, ignoring");
                    continue;
                }

                let event = self.process_file(&path);
                debug!(path = %path.display(), ?event, "candidate done");
                stats.record(&event);
                on_event(&event);
            }
        }

        info!(
            processed = stats.processed,
            skipped = stats.skipped,
            errors = stats.errors,
            "rename run finished"
        );

        Ok(stats)
    }

    /// Decide and apply the outcome for one regular file
    fn process_file(&self, path: &Path) -> RenameEvent {
        let base = self.config.base_dir();
        let algorithm = self.config.algorithm();
        let digest_size = self.config.digest_size();
        let relative = path_utils::display_relative(path, base);

        if self.config.quick() && heuristic::path_looks_like_hash(path, algorithm, digest_size) {
            return RenameEvent::SkippedQuick { path: relative };
        }

        let digest = match self.computer.compute_hash(path, algorithm, digest_size) {
            Ok(result) => result.hash,
            Err(e) => {
                return RenameEvent::Unreadable {
                    path: relative,
                    reason: e.summary(),
                }
            }
        };

        let new_name = path_utils::hashed_file_name(path, &digest);
        if new_name.as_os_str() == path_utils::file_name(path) {
            return RenameEvent::AlreadyFormatted { path: relative };
        }

        let new_path = path.with_file_name(&new_name);
        let new_relative = path_utils::display_relative(&new_path, base);

        if self.config.dry_run() {
            if file_io::has_write_access(path) {
                RenameEvent::WouldRename { from: relative, to: new_relative }
            } else {
                RenameEvent::NotWritable { from: relative, to: new_relative }
            }
        } else {
            match file_io::rename_file(path, &new_path) {
                Ok(()) => RenameEvent::Renamed { from: relative, to: new_relative },
                Err(e) => RenameEvent::RenameFailed {
                    from: relative,
                    to: new_relative,
                    reason: e.summary(),
                },
            }
        }
    }
}

/// Default event sink: stdout for progress, stderr for failures
pub fn print_event(event: &RenameEvent, verbose: bool) {
    if event.is_verbose_only() && !verbose {
        return;
    }
    if event.is_failure() {
        eprintln!("{}", event.to_string().red());
    } else {
        println!("{}", event);
    }
}

// Tests in tests/rename/engine_tests.rs
