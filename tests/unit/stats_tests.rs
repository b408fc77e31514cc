//! Unit tests for run counters

use migback::services::stats::{MigrationStats, PROGRESS_EVERY_FILES};

#[test]
fn test_duration_only_after_finish() {
    let mut stats = MigrationStats::new();
    assert!(stats.duration().is_none());
    assert!(!stats.is_finished());

    stats.finish();
    let first_end = stats.end_time;
    assert!(stats.duration().is_some());

    stats.finish();
    assert_eq!(stats.end_time, first_end, "finish keeps the first timestamp");
}

#[test]
fn test_snapshot_copies_counters() {
    let mut stats = MigrationStats::new();
    stats.files_copied = 3;
    stats.files_skipped = 4;
    stats.dirs_skipped = 1;
    stats.errors = 2;
    stats.bytes_copied = 1024;

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.files_copied, 3);
    assert_eq!(snapshot.files_skipped, 4);
    assert_eq!(snapshot.dirs_skipped, 1);
    assert_eq!(snapshot.errors, 2);
    assert_eq!(snapshot.bytes_copied, 1024);
    assert_eq!(snapshot.duration_seconds, 0);
}

#[test]
fn test_progress_due_on_multiples() {
    let mut stats = MigrationStats::new();
    assert!(stats.progress_due().is_none());

    stats.files_copied = PROGRESS_EVERY_FILES - 1;
    assert!(stats.progress_due().is_none());

    stats.files_copied = PROGRESS_EVERY_FILES;
    stats.bytes_copied = 42;
    let event = stats.progress_due().expect("progress at the first multiple");
    assert_eq!(event.files_copied, PROGRESS_EVERY_FILES);
    assert_eq!(event.bytes_copied, 42);

    stats.files_copied = 2 * PROGRESS_EVERY_FILES + 1;
    assert!(stats.progress_due().is_none());
}
