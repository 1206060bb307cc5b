// Statistics collected during a rename run

use std::fmt;

use super::engine::RenameEvent;

/// Outcome counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RenameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the terminal event of one candidate into the counters
    ///
    /// A failed real rename is reported but not counted.
    pub fn record(&mut self, event: &RenameEvent) {
        match event {
            RenameEvent::Renamed { .. } | RenameEvent::WouldRename { .. } => self.processed += 1,
            RenameEvent::SkippedQuick { .. } | RenameEvent::AlreadyFormatted { .. } => {
                self.skipped += 1
            }
            RenameEvent::Unreadable { .. } | RenameEvent::NotWritable { .. } => self.errors += 1,
            RenameEvent::RenameFailed { .. } => {}
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.errors
    }

    /// Summary line; the first label reads "Processed" for dry runs
    pub fn summary(&self, dry_run: bool) -> String {
        format!(
            "{}: {} Skipped: {} Errors: {} - Total files: {}",
            if dry_run { "Processed" } else { "Renamed" },
            self.processed,
            self.skipped,
            self.errors,
            self.total()
        )
    }
}

impl fmt::Display for RenameStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.summary(false))
    }
}
