//! Migration backup CLI (migback) - Main binary entry point

use migback::cli::args::{BackupArgs, Command, parse_args};
use migback::cli::output::{format_json, print_summary};
use migback::models::ProgressSnapshot;
use migback::services::format::format_size;
use migback::{MigrationOptions, run_migration};
use std::process;
use std::sync::Arc;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-V" => {
            print_version();
            return;
        }
        _ => {}
    }

    // Parse arguments
    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    // Execute command
    let exit_code = match &cli_args.command {
        Command::Backup(backup_args) => handle_backup(backup_args),
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    // RUST_LOG still wins; --verbose only raises the default
    // Example: RUST_LOG=trace migback backup ~/project
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn handle_backup(args: &BackupArgs) -> i32 {
    init_logging(args.verbose);

    let mut opts = MigrationOptions::new(args.source_path(), args.destination_path());
    opts.verbose = args.verbose;
    opts.dry_run = args.dry_run;
    opts.skip_code = args.skip_code;
    opts.skip_downloads = args.skip_downloads;

    if !args.quiet {
        opts.progress_notifier = Some(Arc::new(|snapshot: &ProgressSnapshot| {
            #[allow(clippy::cast_precision_loss)]
            let elapsed_secs = snapshot.elapsed_ms as f64 / 1000.0;
            eprintln!(
                "[{elapsed_secs:6.1}s] {} files copied, {}",
                snapshot.files_copied,
                format_size(snapshot.bytes_copied)
            );
        }));
    }

    let report = match run_migration(&opts) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Backup failed: {e}");
            return match e {
                migback::Error::InvalidInput(_) => 2,
                migback::Error::Io(_) => 4,
            };
        }
    };

    if args.json {
        println!("{}", format_json(&report));
    } else {
        print_summary(&report);
    }

    if report.dry_run && !args.quiet {
        eprintln!("Dry run completed - run without --dry-run to perform the backup");
    }

    if report.stats.errors == 0 {
        0 // Success
    } else {
        3 // Completed with per-entry errors
    }
}

fn print_help() {
    println!("Migration backup CLI (migback) - Copy what matters to a new machine");
    println!();
    println!("USAGE:");
    println!("    migback backup <SOURCE> [DEST] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    backup    Copy SOURCE to DEST, skipping build output, caches and junk");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -V, --version              Show version information");
    println!();
    println!("BACKUP OPTIONS:");
    println!("    --dry-run                 Report what would be copied without writing anything");
    println!("    -v, --verbose             Log every copied and skipped entry");
    println!("    --skip-code               Skip Code/, code/, Development/ and dev/ directories");
    println!("    --skip-downloads          Skip Downloads/ and downloads/ directories");
    println!("    -q, --quiet               Suppress progress output");
    println!("    --json                    Print the run summary as JSON");
    println!();
    println!("DEST defaults to ./migration-backup-<unix-timestamp>.");
    println!("A backup_info.json manifest is written to DEST after every real run.");
    println!();
    println!("EXAMPLES:");
    println!("    migback backup ~ /mnt/usb/home-backup --skip-downloads");
    println!("    migback backup ~/projects --dry-run --verbose");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("migback {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
