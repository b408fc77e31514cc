//! Skip decision engine.
//!
//! Files and directories are checked against the rule tables and the parent
//! directory's `.gitignore` in a fixed precedence order; the first matching
//! tier decides. Directory decisions also report how many skipped files to
//! charge, which is exact for small trees and an estimate for large ones.

use super::count::{count_children, sample_children};
use super::gitignore::GitignorePatterns;
use super::rules;
use std::path::Path;

/// Children sampled before a directory is declared massive.
pub const MASSIVE_SAMPLE_LIMIT: u64 = 1_000;
/// Files charged for a massive directory, regardless of its real size.
pub const MASSIVE_DIR_ESTIMATE: u64 = 50_000;
/// Cap applied by shallow child counting.
pub const COUNT_CAP: u64 = 20_000;
/// Child count above which cache-like directories are dropped.
pub const LARGE_DIR_THRESHOLD: u64 = 5_000;

/// Sampling thresholds used by the directory heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipThresholds {
    pub massive_sample_limit: u64,
    pub massive_dir_estimate: u64,
    pub count_cap: u64,
    pub large_dir_threshold: u64,
}

impl Default for SkipThresholds {
    fn default() -> Self {
        Self {
            massive_sample_limit: MASSIVE_SAMPLE_LIMIT,
            massive_dir_estimate: MASSIVE_DIR_ESTIMATE,
            count_cap: COUNT_CAP,
            large_dir_threshold: LARGE_DIR_THRESHOLD,
        }
    }
}

/// Why a directory was left out of the backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matched `--skip-code` or `--skip-downloads`.
    UserExcluded,
    /// Listed in `SKIP_DIRS`.
    BuildOrCache,
    /// Sampling hit the massive-directory limit.
    Massive,
    /// Matched the parent's `.gitignore`.
    Gitignored,
    /// Many children and a cache/tmp/test-like name.
    LargeCacheLike,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UserExcluded => "user-excluded",
            SkipReason::BuildOrCache => "build/cache",
            SkipReason::Massive => "massive",
            SkipReason::Gitignored => "gitignore",
            SkipReason::LargeCacheLike => "large cache-like",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a directory check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirDecision {
    Keep,
    Skip {
        reason: SkipReason,
        /// Files charged to `files_skipped`.
        files: u64,
    },
}

impl DirDecision {
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, DirDecision::Skip { .. })
    }
}

/// Run-invariant filter state: option flags plus thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipFilter {
    pub skip_code: bool,
    pub skip_downloads: bool,
    pub thresholds: SkipThresholds,
}

impl SkipFilter {
    #[must_use]
    pub fn new(skip_code: bool, skip_downloads: bool, thresholds: SkipThresholds) -> Self {
        Self {
            skip_code,
            skip_downloads,
            thresholds,
        }
    }

    /// Decide whether a file named `name` is left out.
    #[must_use]
    pub fn should_skip_file(&self, name: &str, gitignore: &GitignorePatterns) -> bool {
        if rules::matches_keep_pattern(name) {
            return false;
        }
        if gitignore.matches_file(name) {
            return true;
        }
        rules::matches_skip_pattern(name)
    }

    /// Boolean form of [`SkipFilter::decide_directory`].
    #[must_use]
    pub fn should_skip_directory(
        &self,
        name: &str,
        full_path: &Path,
        gitignore: &GitignorePatterns,
    ) -> bool {
        self.decide_directory(name, full_path, gitignore).is_skip()
    }

    /// Classify a directory and compute the file count charged when skipped.
    ///
    /// The gitignore tier is checked ahead of the massive-directory sample.
    /// Both tiers skip, so the order only changes the charge: an ignored
    /// directory is charged its shallow count rather than the fixed estimate.
    #[must_use]
    pub fn decide_directory(
        &self,
        name: &str,
        full_path: &Path,
        gitignore: &GitignorePatterns,
    ) -> DirDecision {
        let t = &self.thresholds;

        if (self.skip_code && rules::is_code_dir(name))
            || (self.skip_downloads && rules::is_download_dir(name))
        {
            return self.skip_counted(SkipReason::UserExcluded, full_path);
        }

        if rules::is_keep_dotfile(name, full_path) {
            return DirDecision::Keep;
        }

        if rules::is_skip_dir(name, full_path) {
            return self.skip_counted(SkipReason::BuildOrCache, full_path);
        }

        if gitignore.matches_dir(name) {
            return self.skip_counted(SkipReason::Gitignored, full_path);
        }

        match sample_children(full_path, t.massive_sample_limit) {
            Ok(sample) if sample.limit_reached => {
                log::debug!(
                    "Massive directory {} (>= {} entries), estimating {} files",
                    full_path.display(),
                    t.massive_sample_limit,
                    t.massive_dir_estimate
                );
                return DirDecision::Skip {
                    reason: SkipReason::Massive,
                    files: t.massive_dir_estimate,
                };
            }
            Ok(_) => {}
            // The walker reports the open failure when it descends.
            Err(err) => log::trace!("Child sampling failed for {}: {err}", full_path.display()),
        }

        if rules::is_cache_like(name) {
            let count = count_children(full_path, t.count_cap);
            if count > t.large_dir_threshold {
                return DirDecision::Skip {
                    reason: SkipReason::LargeCacheLike,
                    files: count,
                };
            }
        }

        DirDecision::Keep
    }

    fn skip_counted(&self, reason: SkipReason, full_path: &Path) -> DirDecision {
        DirDecision::Skip {
            reason,
            files: count_children(full_path, self.thresholds.count_cap),
        }
    }
}
