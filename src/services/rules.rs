//! Static rule tables consulted by the skip decision engine.
//!
//! Every table is plain configuration data: nothing here changes at runtime.
//! Pattern tables use single-wildcard globs (`prefix*`, `*suffix`,
//! `prefix*suffix` or an exact name) matched against a basename.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use std::sync::LazyLock;

/// Directory names (or trailing path fragments) that are never copied.
pub const SKIP_DIRS: &[&str] = &[
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    "node_modules",
    ".npm",
    ".yarn",
    "dist",
    "build",
    "target",
    ".venv",
    "venv",
    "env",
    ".env",
    "virtualenv",
    ".git",
    ".svn",
    ".hg",
    ".bzr",
    ".Rproj.user",
    ".ropeproject",
    "cmake-build-debug",
    "cmake-build-release",
    ".gradle",
    ".m2",
    ".ivy2",
    ".cargo/registry",
    ".cargo/git",
    "zig-cache",
    "zig-out",
    ".stack-work",
    "_build",
    "deps",
    "_deps",
    ".elixir_ls",
    ".mix",
    "coverage",
    ".coverage",
    ".nyc_output",
    "logs",
    "tmp",
    "temp",
    ".tmp",
    ".temp",
];

/// File patterns for build output, archives, editor droppings and lockfiles.
pub const SKIP_PATTERNS: &[&str] = &[
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "*.so",
    "*.dll",
    "*.dylib",
    "*.o",
    "*.obj",
    "*.class",
    "*.jar",
    "*.war",
    "*.beam",
    "*.plt",
    "*.exe",
    "*.app",
    "*.dmg",
    "*.pkg",
    "*.deb",
    "*.rpm",
    "*.zip",
    "*.tar.gz",
    "*.tar.bz2",
    "*.7z",
    "*.rar",
    "*.swp",
    "*.swo",
    "*~",
    ".DS_Store",
    "Thumbs.db",
    "*.tmp",
    "*.temp",
    "*.cache",
    "*.log",
    "core",
    "core.*",
    "*.core",
    "*.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "*.min.js",
    "*.min.css",
    "*.map",
    ".gitignore",
    ".gitmodules",
];

/// File patterns that are always copied, even when a skip rule matches.
pub const KEEP_PATTERNS: &[&str] = &[
    ".*rc",
    ".*profile",
    ".*_profile",
    ".*_history",
    ".env*",
    ".environment",
    "environment.*",
    "*.conf",
    "*.config",
    "config.*",
    "configuration.*",
    ".gitconfig",
    ".gitignore_global",
    "requirements.txt",
    "Pipfile",
    "pyproject.toml",
    "package.json",
    "Cargo.toml",
    "mix.exs",
    "build.zig",
    "Makefile",
    "CMakeLists.txt",
    "Dockerfile*",
    "flake.nix",
    "shell.nix",
    "default.nix",
    "*.md",
    "*.rst",
    "*.txt",
    "LICENSE*",
    "README*",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.*",
];

/// Dotfile directories (names or trailing path fragments) that are always
/// traversed, overriding every directory skip rule below them.
pub const KEEP_DOTFILES: &[&str] = &[
    ".ssh",
    ".gnupg",
    ".gitconfig",
    ".vimrc",
    ".nvim",
    ".bashrc",
    ".zshrc",
    ".profile",
    ".bash_profile",
    ".tmux.conf",
    ".screenrc",
    ".inputrc",
    ".config",
    ".local/share",
    ".mozilla",
    ".thunderbird",
    ".aws",
    ".docker",
    ".kube",
    ".terraform.d",
    ".cargo/config.toml",
    ".rustup/settings.toml",
    ".npmrc",
    ".yarnrc",
    ".pip",
    ".poetry",
    ".mix",
    ".hex",
    ".iex.exs",
    ".emacs.d",
    ".doom.d",
    ".spacemacs.d",
];

/// Directory names skipped when `skip_code` is set.
pub const CODE_DIRS: &[&str] = &["Code", "code", "Development", "dev"];

/// Directory names skipped when `skip_downloads` is set.
pub const DOWNLOAD_DIRS: &[&str] = &["Downloads", "downloads"];

/// Name fragments that mark a huge directory as disposable.
pub const CACHE_LIKE_FRAGMENTS: &[&str] = &["cache", "tmp", "temp", "test"];

static KEEP_SET: LazyLock<GlobSet> = LazyLock::new(|| build_globset(KEEP_PATTERNS));
static SKIP_SET: LazyLock<GlobSet> = LazyLock::new(|| build_globset(SKIP_PATTERNS));

/// Compile patterns into a matcher, dropping (and logging) any invalid glob.
pub fn build_globset<S: AsRef<str>>(patterns: &[S]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            continue;
        }
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => log::warn!("Ignoring invalid pattern '{pattern}': {err}"),
        }
    }

    builder.build().unwrap_or_else(|err| {
        log::warn!("Failed to compile pattern set: {err}");
        GlobSet::empty()
    })
}

#[must_use]
pub fn matches_keep_pattern(name: &str) -> bool {
    KEEP_SET.is_match(name)
}

#[must_use]
pub fn matches_skip_pattern(name: &str) -> bool {
    SKIP_SET.is_match(name)
}

/// `SKIP_DIRS` lookup: exact basename, or a multi-component entry such as
/// `.cargo/registry` matching the tail of `full_path`.
#[must_use]
pub fn is_skip_dir(name: &str, full_path: &Path) -> bool {
    matches_name_or_suffix(SKIP_DIRS, name, full_path)
}

/// `KEEP_DOTFILES` lookup with the same name-or-suffix semantics.
#[must_use]
pub fn is_keep_dotfile(name: &str, full_path: &Path) -> bool {
    matches_name_or_suffix(KEEP_DOTFILES, name, full_path)
}

#[must_use]
pub fn is_code_dir(name: &str) -> bool {
    CODE_DIRS.contains(&name)
}

#[must_use]
pub fn is_download_dir(name: &str) -> bool {
    DOWNLOAD_DIRS.contains(&name)
}

/// Case-insensitive substring test against [`CACHE_LIKE_FRAGMENTS`].
#[must_use]
pub fn is_cache_like(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    CACHE_LIKE_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

fn matches_name_or_suffix(table: &[&str], name: &str, full_path: &Path) -> bool {
    table.iter().any(|entry| {
        if entry.contains('/') {
            full_path.ends_with(entry)
        } else {
            *entry == name
        }
    })
}
