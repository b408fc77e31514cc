//! Tests driving the compiled binary

use crate::fixtures::create_home_fixture;
use std::process::Command;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_migback");

#[test]
fn test_help_output() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("migback backup"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_version_output_includes_commit_and_date() {
    let output = Command::new(BIN).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(concat!("migback ", env!("CARGO_PKG_VERSION"))));
    let commit_line = stdout
        .lines()
        .find(|line| line.starts_with("Commit: "))
        .expect("commit line");
    assert!(commit_line.contains(env!("GIT_HASH")));
    assert!(commit_line.contains(&format!("({})", env!("GIT_DATE"))));
    assert!(stdout.contains("Target: "));
}

#[test]
fn test_unknown_command_exits_with_usage_error() {
    let output = Command::new(BIN).arg("restore").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_backup_prints_summary() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_home_fixture(temp_dir.path()).unwrap();
    let dest = temp_dir.path().join("backup");

    let output = Command::new(BIN)
        .arg("backup")
        .arg(&source)
        .arg(&dest)
        .arg("--quiet")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BACKUP SUMMARY"));
    assert!(stdout.contains("Files copied:"));
    assert!(dest.join("backup_info.json").exists());
}

#[test]
fn test_missing_source_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = Command::new(BIN)
        .arg("backup")
        .arg(temp_dir.path().join("missing"))
        .arg(temp_dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_dry_run_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_home_fixture(temp_dir.path()).unwrap();
    let dest = temp_dir.path().join("backup");

    let output = Command::new(BIN)
        .args(["backup", "--dry-run", "--json", "--quiet"])
        .arg(&source)
        .arg(&dest)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["dry_run"], true);
    assert!(value["manifest"].is_null());
    assert_eq!(value["info"]["stats"]["files_copied"], 4);
    assert!(!dest.exists());
}
