//! Shallow child counting used to charge skipped directories.
//!
//! Counts cover immediate children only and stop at a caller-supplied limit,
//! so the figures are approximations for deep or huge trees.

use std::io;
use std::path::Path;

#[cfg(unix)]
use rustix::fs::{self as rfs, Dir, Mode, OFlags};

/// Result of reading at most `limit` children of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSample {
    pub sampled: u64,
    pub limit_reached: bool,
}

/// Count immediate children of `dir`, stopping once `limit` is reached.
///
/// Unreadable directories count as empty.
#[must_use]
pub fn count_children(dir: &Path, limit: u64) -> u64 {
    match sample_children(dir, limit) {
        Ok(sample) => sample.sampled,
        Err(err) => {
            log::debug!("Could not count entries in {}: {err}", dir.display());
            0
        }
    }
}

/// Sample up to `limit` immediate children of `dir`.
pub fn sample_children(dir: &Path, limit: u64) -> io::Result<ChildSample> {
    let mut sampled = 0u64;
    if limit == 0 {
        return Ok(ChildSample {
            sampled,
            limit_reached: true,
        });
    }

    for_each_child(dir, |_| {
        sampled += 1;
        sampled < limit
    })?;

    Ok(ChildSample {
        sampled,
        limit_reached: sampled >= limit,
    })
}

/// Visit child names until `visit` returns `false`.
#[cfg(unix)]
fn for_each_child<F>(dir: &Path, mut visit: F) -> io::Result<()>
where
    F: FnMut(&[u8]) -> bool,
{
    let dir_fd = rfs::openat(
        rfs::CWD,
        dir,
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
        Mode::empty(),
    )?;

    for entry in Dir::read_from(&dir_fd)? {
        let entry = entry?;
        let name = entry.file_name().to_bytes();
        if name == b"." || name == b".." {
            continue;
        }
        if !visit(name) {
            break;
        }
    }

    Ok(())
}

#[cfg(not(unix))]
fn for_each_child<F>(dir: &Path, mut visit: F) -> io::Result<()>
where
    F: FnMut(&[u8]) -> bool,
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !visit(name.to_string_lossy().as_bytes()) {
            break;
        }
    }

    Ok(())
}
