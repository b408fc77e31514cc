//! Output formatting for CLI

use crate::MigrationReport;
use crate::io::manifest::backup_info;
use crate::services::format::{format_duration, format_size};
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// Render the end-of-run summary as a fixed-width table
#[must_use]
pub fn format_summary(report: &MigrationReport) -> String {
    let stats = &report.stats;
    let rule = "=".repeat(RULE_WIDTH);
    let title = if report.dry_run {
        "BACKUP SUMMARY (dry run)"
    } else {
        "BACKUP SUMMARY"
    };
    let duration = stats
        .duration()
        .map_or_else(|| "-".to_string(), format_duration);

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<16}{:>14}", "Files copied:", stats.files_copied);
    let _ = writeln!(out, "{:<16}{:>14}", "Files skipped:", stats.files_skipped);
    let _ = writeln!(out, "{:<16}{:>14}", "Dirs skipped:", stats.dirs_skipped);
    let _ = writeln!(out, "{:<16}{:>14}", "Errors:", stats.errors);
    let _ = writeln!(
        out,
        "{:<16}{:>14}  ({})",
        "Bytes copied:",
        stats.bytes_copied,
        format_size(stats.bytes_copied)
    );
    let _ = writeln!(out, "{:<16}{:>14}", "Duration:", duration);
    let _ = writeln!(out, "{:<16}{}", "Backup location:", report.destination.display());
    if let Some(manifest) = &report.manifest_path {
        let _ = writeln!(out, "{:<16}{}", "Manifest:", manifest.display());
    }
    let _ = write!(out, "{rule}");
    out
}

/// Print the summary table to stdout
pub fn print_summary(report: &MigrationReport) {
    println!("{}", format_summary(report));
}

/// Format the run as JSON in the same shape as the manifest
#[must_use]
pub fn format_json(report: &MigrationReport) -> String {
    let info = backup_info(&report.source, &report.destination, &report.stats);
    let output = serde_json::json!({
        "dry_run": report.dry_run,
        "manifest": report.manifest_path.as_ref().map(|p| p.to_string_lossy().to_string()),
        "info": info,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
