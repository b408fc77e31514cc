//! Copy primitive for regular files and symlinks.
//!
//! In dry-run mode nothing is opened or written; the entry is only counted.

use super::walk::MigrationEngine;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Result of copying one regular file.
#[derive(Debug)]
pub struct CopiedFile {
    pub bytes: u64,
    /// Set when the bytes were copied but the permission bits were not.
    pub permissions_error: Option<io::Error>,
}

/// Copy `source` to `dest`, creating missing parent directories.
///
/// Permission bits are copied best-effort after the content.
pub fn copy_file_contents(source: &Path, dest: &Path) -> io::Result<CopiedFile> {
    let mut reader = File::open(source)?;
    let metadata = reader.metadata()?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    // Creating the destination would truncate the open source.
    if let Ok(dest_metadata) = fs::metadata(dest)
        && is_same_file(source, &metadata, dest, &dest_metadata)
    {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "{} and {} are the same file",
                source.display(),
                dest.display()
            ),
        ));
    }

    let mut writer = File::create(dest)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    log::trace!(
        "Copied {bytes} of {} bytes from {}",
        metadata.len(),
        source.display()
    );

    let permissions_error = fs::set_permissions(dest, metadata.permissions()).err();

    Ok(CopiedFile {
        bytes,
        permissions_error,
    })
}

#[cfg(unix)]
fn is_same_file(_source: &Path, src: &fs::Metadata, _dest: &Path, dst: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    src.dev() == dst.dev() && src.ino() == dst.ino()
}

#[cfg(not(unix))]
fn is_same_file(source: &Path, _src: &fs::Metadata, dest: &Path, _dst: &fs::Metadata) -> bool {
    match (source.canonicalize(), dest.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a symlink at `dest` pointing at `target`, verbatim.
pub fn create_symlink(target: &Path, dest: &Path, source: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    platform_symlink(target, dest, source)
}

#[cfg(unix)]
fn platform_symlink(target: &Path, dest: &Path, _source: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(windows)]
fn platform_symlink(target: &Path, dest: &Path, source: &Path) -> io::Result<()> {
    // Windows needs to know whether the link points at a directory.
    if fs::metadata(source).is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    }
}

#[cfg(not(any(unix, windows)))]
fn platform_symlink(_target: &Path, _dest: &Path, _source: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

impl MigrationEngine {
    /// Copy one regular file, updating the run counters.
    pub fn copy_file(&mut self, source: &Path, dest: &Path) {
        if self.options.dry_run {
            self.trace(format_args!(
                "Would copy: {} -> {}",
                source.display(),
                dest.display()
            ));
            self.record_copied(0);
            return;
        }

        match copy_file_contents(source, dest) {
            Ok(copied) => {
                if let Some(err) = copied.permissions_error {
                    log::warn!("Failed to copy permissions to {}: {err}", dest.display());
                }
                self.trace(format_args!(
                    "Copied: {} ({} bytes)",
                    source.display(),
                    copied.bytes
                ));
                self.record_copied(copied.bytes);
            }
            Err(err) => {
                log::warn!(
                    "Failed to copy {} to {}: {err}",
                    source.display(),
                    dest.display()
                );
                self.stats.errors += 1;
            }
        }
    }

    /// Recreate the symlink at `source` under `dest` with the same target.
    pub fn copy_symlink(&mut self, source: &Path, dest: &Path) {
        let target = match fs::read_link(source) {
            Ok(target) => target,
            Err(err) => {
                log::warn!("Failed to read symlink {}: {err}", source.display());
                self.stats.errors += 1;
                return;
            }
        };

        if self.options.dry_run {
            self.trace(format_args!(
                "Would link: {} -> {}",
                dest.display(),
                target.display()
            ));
            self.record_copied(0);
            return;
        }

        match create_symlink(&target, dest, source) {
            Ok(()) => {
                self.trace(format_args!(
                    "Linked: {} -> {}",
                    dest.display(),
                    target.display()
                ));
                self.record_copied(0);
            }
            Err(err) => {
                log::warn!("Failed to create symlink {}: {err}", dest.display());
                self.stats.errors += 1;
            }
        }
    }

    fn record_copied(&mut self, bytes: u64) {
        self.stats.files_copied += 1;
        self.stats.bytes_copied += bytes;

        if self.options.verbose {
            return;
        }
        if let Some(notifier) = &self.options.progress_notifier
            && let Some(snapshot) = self.stats.progress_due()
        {
            notifier(&snapshot);
        }
    }
}
