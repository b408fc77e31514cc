//! Backup manifest (`backup_info.json`) writing.
//!
//! The manifest is written once at the destination root after a successful
//! non-dry run. The engine never reads it back; `read_manifest` exists for
//! tooling and tests.

use crate::models::BackupInfo;
use crate::services::stats::MigrationStats;
use std::fs::File;
use std::io::{BufReader, BufWriter, Error, Result, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// File name of the manifest inside the destination directory.
pub const MANIFEST_FILE: &str = "backup_info.json";

/// Manifest format version.
pub const MANIFEST_VERSION: &str = "1.0";

/// Build the manifest document for a finished run.
#[must_use]
pub fn backup_info(source: &Path, destination: &Path, stats: &MigrationStats) -> BackupInfo {
    let stamp = stats.end_time.unwrap_or_else(SystemTime::now);
    let secs = stamp
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    BackupInfo {
        timestamp: secs.to_string(),
        source: source.to_string_lossy().to_string(),
        destination: destination.to_string_lossy().to_string(),
        version: MANIFEST_VERSION.to_string(),
        stats: stats.snapshot(),
    }
}

/// Write `info` as pretty JSON to `<destination>/backup_info.json`.
pub fn write_manifest(destination: &Path, info: &BackupInfo) -> Result<PathBuf> {
    let path = destination.join(MANIFEST_FILE);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, info).map_err(Error::other)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(path)
}

/// Read a manifest previously written by [`write_manifest`].
pub fn read_manifest(path: &Path) -> Result<BackupInfo> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(Error::other)
}
