//! Selective Migration Backup Library
//!
//! This library copies a home or project directory to a backup location while
//! leaving out build artifacts, caches and other junk. Configuration files,
//! dotfiles and symlinks are preserved, `.gitignore` files are honoured for
//! their own directory, and every run ends with a JSON manifest.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{BackupInfo, ProgressSnapshot, StatsSnapshot};
pub use services::filter::{DirDecision, SkipFilter, SkipReason, SkipThresholds};
pub use services::stats::MigrationStats;
pub use services::walk::MigrationEngine;

use std::path::{Path, PathBuf};
use std::result;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::InvalidInput(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Callback receiving periodic progress while files are copied
pub type ProgressNotifier = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Options for one backup run, fixed once the run starts
#[derive(Clone)]
pub struct MigrationOptions {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub verbose: bool,
    pub dry_run: bool,
    pub skip_code: bool,
    pub skip_downloads: bool,
    pub thresholds: SkipThresholds,
    pub progress_notifier: Option<ProgressNotifier>,
}

impl MigrationOptions {
    /// Options with every flag off and default thresholds
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source.into(),
            dest_path: dest.into(),
            verbose: false,
            dry_run: false,
            skip_code: false,
            skip_downloads: false,
            thresholds: SkipThresholds::default(),
            progress_notifier: None,
        }
    }
}

impl std::fmt::Debug for MigrationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationOptions")
            .field("source_path", &self.source_path)
            .field("dest_path", &self.dest_path)
            .field("verbose", &self.verbose)
            .field("dry_run", &self.dry_run)
            .field("skip_code", &self.skip_code)
            .field("skip_downloads", &self.skip_downloads)
            .field("thresholds", &self.thresholds)
            .field("progress_notifier", &self.progress_notifier.is_some())
            .finish()
    }
}

/// Outcome of a completed run
#[derive(Debug)]
pub struct MigrationReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dry_run: bool,
    pub stats: MigrationStats,
    /// Path of the written manifest, `None` for dry runs or when writing failed
    pub manifest_path: Option<PathBuf>,
}

/// Default destination: `migration-backup-<unix-timestamp>` in the working directory
#[must_use]
pub fn default_destination() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    PathBuf::from(format!("migration-backup-{secs}"))
}

/// Run a backup and write its manifest
///
/// # Arguments
/// * `opts` - Source, destination and behaviour flags
///
/// # Returns
/// A report with the final counters. Only pre-flight failures (missing
/// source, destination cannot be created) are returned as errors.
pub fn run_migration(opts: &MigrationOptions) -> Result<MigrationReport> {
    let mut engine = MigrationEngine::new(opts.clone());
    engine.run()?;
    let stats = engine.into_stats();

    let manifest_path = if opts.dry_run {
        None
    } else {
        create_backup_info(&opts.source_path, &opts.dest_path, &stats)
    };

    Ok(MigrationReport {
        source: opts.source_path.clone(),
        destination: opts.dest_path.clone(),
        dry_run: opts.dry_run,
        stats,
        manifest_path,
    })
}

/// Write the manifest, downgrading failures to a warning
fn create_backup_info(source: &Path, dest: &Path, stats: &MigrationStats) -> Option<PathBuf> {
    let info = io::manifest::backup_info(source, dest, stats);
    match io::manifest::write_manifest(dest, &info) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("Could not create backup info file: {e}");
            None
        }
    }
}
