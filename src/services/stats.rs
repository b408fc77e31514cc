//! Run counters and progress emission.

use crate::models::{ProgressSnapshot, StatsSnapshot};
use std::time::{Duration, SystemTime};

/// Files copied between two progress events.
pub const PROGRESS_EVERY_FILES: u64 = 1_000;

/// Counters accumulated while walking the source tree.
///
/// `end_time` stays unset until [`MigrationStats::finish`] is called.
#[derive(Debug, Clone)]
pub struct MigrationStats {
    pub files_copied: u64,
    pub files_skipped: u64,
    pub dirs_skipped: u64,
    pub errors: u64,
    pub bytes_copied: u64,
    pub start_time: SystemTime,
    pub end_time: Option<SystemTime>,
}

impl Default for MigrationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files_copied: 0,
            files_skipped: 0,
            dirs_skipped: 0,
            errors: 0,
            bytes_copied: 0,
            start_time: SystemTime::now(),
            end_time: None,
        }
    }

    /// Stamp the end of the run. Later calls keep the first timestamp.
    pub fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(SystemTime::now());
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Wall-clock duration of the run, `None` before `finish()`.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        let end = self.end_time?;
        Some(end.duration_since(self.start_time).unwrap_or_default())
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            files_copied: self.files_copied,
            files_skipped: self.files_skipped,
            dirs_skipped: self.dirs_skipped,
            errors: self.errors,
            bytes_copied: self.bytes_copied,
            duration_seconds: self.duration().map_or(0, |d| d.as_secs()),
        }
    }

    /// Progress event for the current counters if the copy count just crossed
    /// a multiple of [`PROGRESS_EVERY_FILES`].
    #[must_use]
    pub fn progress_due(&self) -> Option<ProgressSnapshot> {
        if self.files_copied == 0 || self.files_copied % PROGRESS_EVERY_FILES != 0 {
            return None;
        }

        let elapsed = SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or_default();

        Some(ProgressSnapshot {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            files_copied: self.files_copied,
            bytes_copied: self.bytes_copied,
        })
    }
}
