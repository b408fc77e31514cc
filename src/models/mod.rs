//! Data models for run statistics, progress events and the backup manifest

use serde::{Deserialize, Serialize};

/// Serializable view of the run counters, as stored in the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub files_copied: u64,
    pub files_skipped: u64,
    pub dirs_skipped: u64,
    pub errors: u64,
    pub bytes_copied: u64,
    pub duration_seconds: u64,
}

/// Contents of `backup_info.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub timestamp: String, // unix seconds
    pub source: String,
    pub destination: String,
    pub version: String,
    pub stats: StatsSnapshot,
}

/// Progress event emitted while copying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub elapsed_ms: u64,
    pub files_copied: u64,
    pub bytes_copied: u64,
}
