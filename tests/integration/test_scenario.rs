//! End-to-end scenario: a project with dependencies, sources and a large
//! gitignored cache directory

use crate::fixtures::{options, populate, write_file_sync};
use migback::io::manifest::read_manifest;
use migback::run_migration;
use tempfile::TempDir;

#[test]
fn test_project_with_ignored_cache() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    let dest = temp_dir.path().join("backup");

    write_file_sync(project.join("node_modules/pkg/index.js"), b"module.exports = 1;").unwrap();
    write_file_sync(project.join("src/main.go"), b"package main\n").unwrap();
    write_file_sync(project.join(".bashrc"), b"alias ll='ls -l'\n").unwrap();
    write_file_sync(project.join(".gitignore"), b"cache/\n").unwrap();
    populate(&project.join("cache"), 6_000).unwrap();

    let report = run_migration(&options(&project, &dest)).unwrap();
    let stats = &report.stats;

    assert_eq!(stats.files_copied, 2, "main.go and .bashrc");
    assert_eq!(stats.dirs_skipped, 2, "node_modules and cache");
    assert_eq!(stats.errors, 0);
    // cache is charged its real 6000 entries, node_modules its single `pkg`
    // child, plus the .gitignore file itself
    assert_eq!(stats.files_skipped, 6_000 + 1 + 1);

    assert!(dest.join("src/main.go").exists());
    assert!(dest.join(".bashrc").exists());
    assert!(!dest.join("cache").exists());
    assert!(!dest.join("node_modules").exists());

    let manifest = read_manifest(&report.manifest_path.unwrap()).unwrap();
    assert_eq!(manifest.stats.files_copied, 2);
    assert_eq!(manifest.stats.dirs_skipped, 2);
    assert_eq!(manifest.stats.errors, 0);
}

#[test]
fn test_bashrc_survives_matching_gitignore() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    let dest = temp_dir.path().join("backup");

    write_file_sync(home.join(".gitignore"), b".*\n*\n").unwrap();
    write_file_sync(home.join(".bashrc"), b"set -o vi\n").unwrap();
    write_file_sync(home.join("scratch.bin"), b"\x00").unwrap();

    let report = run_migration(&options(&home, &dest)).unwrap();

    assert!(dest.join(".bashrc").exists());
    assert!(!dest.join("scratch.bin").exists());
    assert_eq!(report.stats.files_copied, 1);
}
