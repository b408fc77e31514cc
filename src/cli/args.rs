//! CLI argument parsing

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Backup(BackupArgs),
}

#[derive(Debug, Clone, Default)]
pub struct BackupArgs {
    pub source: String,
    pub destination: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub skip_code: bool,
    pub skip_downloads: bool,
    pub quiet: bool,
    pub json: bool,
}

impl BackupArgs {
    /// Source path with a leading `~` expanded
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        expand_home(&self.source)
    }

    /// Destination path, falling back to `migration-backup-<timestamp>`
    #[must_use]
    pub fn destination_path(&self) -> PathBuf {
        self.destination
            .as_deref()
            .map_or_else(crate::default_destination, expand_home)
    }
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let command = match args[1].as_str() {
        "backup" => {
            let backup_args = parse_backup_args(&args[2..])?;
            Command::Backup(backup_args)
        }
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

fn parse_backup_args(args: &[String]) -> Result<BackupArgs, String> {
    let mut backup_args = BackupArgs::default();

    for arg in args {
        match arg.as_str() {
            "--dry-run" => backup_args.dry_run = true,
            "--verbose" | "-v" => backup_args.verbose = true,
            "--skip-code" => backup_args.skip_code = true,
            "--skip-downloads" => backup_args.skip_downloads = true,
            "--quiet" | "-q" => backup_args.quiet = true,
            "--json" => backup_args.json = true,
            other if !other.starts_with('-') => {
                if backup_args.source.is_empty() {
                    backup_args.source = other.to_string();
                } else if backup_args.destination.is_none() {
                    backup_args.destination = Some(other.to_string());
                } else {
                    return Err(format!("Unexpected argument: {other}"));
                }
            }
            _ => return Err(format!("Unknown option: {arg}")),
        }
    }

    if backup_args.source.is_empty() {
        return Err("Missing required argument: SOURCE".to_string());
    }

    Ok(backup_args)
}

/// Expand a leading `~` or `~/` to the user's home directory
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
