//! Unit tests for human-readable output

use migback::services::format::{format_duration, format_size};
use migback::services::stats::MigrationStats;
use migback::MigrationReport;
use migback::cli::output::{format_json, format_summary};
use std::path::PathBuf;
use std::time::Duration;

fn report(dry_run: bool) -> MigrationReport {
    let mut stats = MigrationStats::new();
    stats.files_copied = 12;
    stats.files_skipped = 3400;
    stats.dirs_skipped = 5;
    stats.bytes_copied = 2048;
    stats.finish();

    MigrationReport {
        source: PathBuf::from("/home/user"),
        destination: PathBuf::from("/mnt/backup"),
        dry_run,
        stats,
        manifest_path: None,
    }
}

#[test]
fn test_format_size() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1023), "1023 B");
    assert_eq!(format_size(1024), "1.00 KB");
    assert_eq!(format_size(1536 * 1024), "1.50 MB");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(3400)), "3.4s");
    assert_eq!(format_duration(Duration::from_secs(125)), "2m 05s");
    assert_eq!(format_duration(Duration::from_secs(3723)), "1h 02m 03s");
}

#[test]
fn test_summary_table_lists_every_counter() {
    let text = format_summary(&report(false));

    assert!(text.starts_with(&"=".repeat(50)));
    assert!(text.contains("BACKUP SUMMARY"));
    assert!(!text.contains("dry run"));
    for label in ["Files copied:", "Files skipped:", "Dirs skipped:", "Errors:", "Bytes copied:", "Duration:"] {
        assert!(text.contains(label), "missing {label}");
    }
    assert!(text.contains("3400"));
    assert!(text.contains("2.00 KB"));
    assert!(text.contains("/mnt/backup"));
}

#[test]
fn test_summary_marks_dry_run() {
    assert!(format_summary(&report(true)).contains("BACKUP SUMMARY (dry run)"));
}

#[test]
fn test_json_output_shape() {
    let value: serde_json::Value = serde_json::from_str(&format_json(&report(true))).unwrap();
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["info"]["stats"]["files_skipped"], 3400);
    assert_eq!(value["info"]["destination"], "/mnt/backup");
}
