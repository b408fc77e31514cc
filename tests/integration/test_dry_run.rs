//! Dry-run mode must never touch the destination

use crate::fixtures::{create_home_fixture, options, snapshot_tree, write_file_sync};
use migback::run_migration;
use tempfile::TempDir;

#[test]
fn test_dry_run_does_not_create_destination() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_home_fixture(temp_dir.path()).unwrap();
    let dest = temp_dir.path().join("never-created");

    let mut opts = options(&source, &dest);
    opts.dry_run = true;
    let report = run_migration(&opts).unwrap();

    assert!(!dest.exists(), "dry run must not create the destination");
    assert!(report.manifest_path.is_none());
    assert!(report.dry_run);
}

#[test]
fn test_dry_run_leaves_existing_destination_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_home_fixture(temp_dir.path()).unwrap();
    let dest = temp_dir.path().join("existing");
    write_file_sync(dest.join("old/file.txt"), b"previous backup").unwrap();

    let before = snapshot_tree(&dest);

    let mut opts = options(&source, &dest);
    opts.dry_run = true;
    opts.verbose = true;
    run_migration(&opts).unwrap();

    assert_eq!(before, snapshot_tree(&dest));
}

#[test]
fn test_dry_run_makes_the_same_decisions() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_home_fixture(temp_dir.path()).unwrap();

    let mut dry = options(&source, &temp_dir.path().join("dry"));
    dry.dry_run = true;
    let dry_report = run_migration(&dry).unwrap();
    let real_report = run_migration(&options(&source, &temp_dir.path().join("real"))).unwrap();

    assert_eq!(dry_report.stats.files_copied, real_report.stats.files_copied);
    assert_eq!(dry_report.stats.files_skipped, real_report.stats.files_skipped);
    assert_eq!(dry_report.stats.dirs_skipped, real_report.stats.dirs_skipped);
    // Nothing is read in dry-run mode
    assert_eq!(dry_report.stats.bytes_copied, 0);
}
