//! Depth-first directory walker.
//!
//! The walker visits one entry at a time, asks the skip filter about it and
//! then recurses, copies or skips. Per-entry failures are counted in the run
//! statistics and never abort the walk.

use super::filter::{DirDecision, SkipFilter};
use super::gitignore::GitignoreCache;
use super::stats::MigrationStats;
use crate::{Error, MigrationOptions, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Deepest directory level the walker descends into.
pub const MAX_WALK_DEPTH: u16 = 20;

/// Engine state for one backup run.
pub struct MigrationEngine {
    pub(crate) options: MigrationOptions,
    pub(crate) filter: SkipFilter,
    pub(crate) gitignore: GitignoreCache,
    pub(crate) stats: MigrationStats,
    /// Destination directory when it lives inside the source tree.
    nested_destination: Option<PathBuf>,
}

impl MigrationEngine {
    #[must_use]
    pub fn new(options: MigrationOptions) -> Self {
        let filter = SkipFilter::new(options.skip_code, options.skip_downloads, options.thresholds);
        Self {
            options,
            filter,
            gitignore: GitignoreCache::new(),
            stats: MigrationStats::new(),
            nested_destination: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    #[must_use]
    pub fn stats(&self) -> &MigrationStats {
        &self.stats
    }

    #[must_use]
    pub fn gitignore_cache(&self) -> &GitignoreCache {
        &self.gitignore
    }

    #[must_use]
    pub fn into_stats(self) -> MigrationStats {
        self.stats
    }

    /// Validate the source, prepare the destination and walk the whole tree.
    ///
    /// Only pre-flight problems are returned as errors; everything that goes
    /// wrong during the walk is counted in the statistics.
    pub fn run(&mut self) -> Result<()> {
        let source = self.options.source_path.clone();
        let dest = self.options.dest_path.clone();

        if !source.exists() {
            return Err(Error::InvalidInput(format!(
                "Source directory does not exist: {}",
                source.display()
            )));
        }
        if !source.is_dir() {
            return Err(Error::InvalidInput(format!(
                "Source path is not a directory: {}",
                source.display()
            )));
        }

        check_destination(&source, &dest)?;

        log::info!(
            "Starting migration backup from {} to {}",
            source.display(),
            dest.display()
        );

        if self.options.dry_run {
            log::info!("DRY RUN MODE - no files will be written");
        } else {
            fs::create_dir_all(&dest)?;
        }
        self.nested_destination = nested_destination(&source, &dest);

        self.walk(&source, &dest, 0);
        self.stats.finish();

        Ok(())
    }

    /// Copy the filtered subtree rooted at `source` into `dest`.
    pub fn walk(&mut self, source: &Path, dest: &Path, depth: u16) {
        if depth > MAX_WALK_DEPTH {
            log::warn!("Maximum recursion depth reached for {}", source.display());
            return;
        }

        let entries = match fs::read_dir(source) {
            Ok(entries) => entries,
            Err(err) => {
                self.trace(format_args!(
                    "Error scanning directory {}: {err}",
                    source.display()
                ));
                self.stats.errors += 1;
                return;
            }
        };

        let gitignore = self.gitignore.patterns_for(source);

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.trace(format_args!(
                        "Error reading entry in {}: {err}",
                        source.display()
                    ));
                    self.stats.errors += 1;
                    continue;
                }
            };

            let entry_path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.trace(format_args!("Error processing {}: {err}", entry_path.display()));
                    self.stats.errors += 1;
                    continue;
                }
            };

            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            let target = dest.join(&file_name);

            if file_type.is_symlink() {
                self.copy_symlink(&entry_path, &target);
            } else if file_type.is_file() {
                if self.filter.should_skip_file(&name, &gitignore) {
                    self.trace(format_args!("Skipping file: {}", entry_path.display()));
                    self.stats.files_skipped += 1;
                } else {
                    self.copy_file(&entry_path, &target);
                }
            } else if file_type.is_dir() {
                if self.nested_destination.as_deref() == Some(entry_path.as_path()) {
                    log::debug!("Not descending into backup destination {}", entry_path.display());
                    continue;
                }

                match self.filter.decide_directory(&name, &entry_path, &gitignore) {
                    DirDecision::Skip { reason, files } => {
                        self.trace(format_args!(
                            "Skipping directory ({reason}, ~{files} files): {}",
                            entry_path.display()
                        ));
                        self.stats.dirs_skipped += 1;
                        self.stats.files_skipped += files;
                    }
                    DirDecision::Keep => {
                        if !self.options.dry_run
                            && let Err(err) = fs::create_dir_all(&target)
                        {
                            log::warn!("Failed to create directory {}: {err}", target.display());
                            self.stats.errors += 1;
                            continue;
                        }
                        self.walk(&entry_path, &target, depth + 1);
                    }
                }
            } else {
                log::trace!("Ignoring special file {}", entry_path.display());
            }
        }
    }

    /// Per-entry trace line, emitted only in verbose mode.
    pub(crate) fn trace(&self, message: fmt::Arguments<'_>) {
        if self.options.verbose {
            log::info!("{message}");
        }
    }
}

/// Reject a destination that is the source itself or one of its ancestors;
/// copying there would overwrite the files being read.
fn check_destination(source: &Path, dest: &Path) -> Result<()> {
    let Ok(dest_abs) = dest.canonicalize() else {
        // A destination that does not exist yet cannot contain the source.
        return Ok(());
    };
    let source_abs = source.canonicalize()?;

    if source_abs.starts_with(&dest_abs) {
        return Err(Error::InvalidInput(format!(
            "Destination {} contains the source directory {}",
            dest.display(),
            source.display()
        )));
    }
    Ok(())
}

/// Where `dest` sits inside `source`, expressed as a path under `source` so it
/// compares equal to the paths the walker builds.
fn nested_destination(source: &Path, dest: &Path) -> Option<PathBuf> {
    let source_abs = source.canonicalize().ok()?;
    let dest_abs = dest.canonicalize().ok()?;
    let relative = dest_abs.strip_prefix(&source_abs).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(source.join(relative))
}
