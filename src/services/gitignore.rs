//! Per-run cache of `.gitignore` patterns.
//!
//! Patterns are scoped to the directory that owns the `.gitignore` and only
//! apply to its direct children; descendants do not inherit them.

use super::rules::build_globset;
use globset::GlobSet;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Patterns read from one directory's `.gitignore`.
#[derive(Debug)]
pub struct GitignorePatterns {
    patterns: Vec<String>,
    file_matcher: GlobSet,
    dir_matcher: GlobSet,
}

impl Default for GitignorePatterns {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            file_matcher: GlobSet::empty(),
            dir_matcher: GlobSet::empty(),
        }
    }
}

impl GitignorePatterns {
    /// Parse the text of a `.gitignore` file.
    ///
    /// Blank lines and `#` comments are dropped. Negated (`!`) lines are not
    /// supported and are ignored. A leading `/` is stripped; a trailing `/`
    /// restricts the pattern to directories.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let mut patterns = Vec::new();
        let mut file_globs = Vec::new();
        let mut dir_globs = Vec::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('!') {
                log::debug!("Negated gitignore pattern not supported: {line}");
                continue;
            }

            patterns.push(line.to_string());

            let anchored = line.strip_prefix('/').unwrap_or(line);
            if let Some(dir_only) = anchored.strip_suffix('/') {
                dir_globs.push(dir_only.to_string());
            } else {
                file_globs.push(anchored.to_string());
                dir_globs.push(anchored.to_string());
            }
        }

        Self {
            patterns,
            file_matcher: build_globset(&file_globs),
            dir_matcher: build_globset(&dir_globs),
        }
    }

    /// Raw pattern lines in file order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn matches_file(&self, name: &str) -> bool {
        self.file_matcher.is_match(name)
    }

    #[must_use]
    pub fn matches_dir(&self, name: &str) -> bool {
        self.dir_matcher.is_match(name)
    }
}

/// Lazily populated map from directory path to its parsed `.gitignore`.
///
/// Entries are inserted once and never refreshed during a run.
#[derive(Debug, Default)]
pub struct GitignoreCache {
    entries: HashMap<String, Rc<GitignorePatterns>>,
}

impl GitignoreCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the patterns for `dir`, reading its `.gitignore` on first use.
    pub fn patterns_for(&mut self, dir: &Path) -> Rc<GitignorePatterns> {
        let key = dir.to_string_lossy().into_owned();
        Rc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Rc::new(load_gitignore(dir))),
        )
    }

    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.entries.contains_key(dir.to_string_lossy().as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and parse `dir/.gitignore`; a missing or unreadable file yields no patterns.
#[must_use]
pub fn load_gitignore(dir: &Path) -> GitignorePatterns {
    let path = dir.join(GITIGNORE_FILE);
    match fs::read_to_string(&path) {
        Ok(contents) => GitignorePatterns::parse(&contents),
        Err(err) if err.kind() == io::ErrorKind::NotFound => GitignorePatterns::default(),
        Err(err) => {
            log::warn!("Could not read .gitignore from {}: {err}", dir.display());
            GitignorePatterns::default()
        }
    }
}
