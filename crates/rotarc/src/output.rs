//! Output formatting for rotation reports

use colored::Colorize;
use rotarc_core::{PruneReport, RotationReport, SizeCheck};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING!".yellow().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a serializable report as pretty JSON
pub fn print_json<T: Serialize>(report: &T) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

pub fn print_rotation(report: &RotationReport) {
    if is_json_mode() {
        print_json(report);
        return;
    }
    if report.files_archived == 0 {
        print_success("No log files to archive");
        return;
    }
    match &report.largest {
        Some(largest) => print_success(&format!(
            "Archived {} file(s); largest: {} ({})",
            report.files_archived,
            largest.name,
            format_bytes(largest.size_bytes)
        )),
        None => print_success(&format!("Archived {} file(s)", report.files_archived)),
    }
    if let Some(path) = &report.archive_path {
        println!("  {}", path.display());
    }
    if report.cleanup_failures > 0 {
        print_warning(&format!(
            "{} source file(s) could not be deleted after archiving",
            report.cleanup_failures
        ));
    }
}

pub fn print_size_check(check: &SizeCheck) {
    if is_json_mode() {
        print_json(check);
        return;
    }
    if check.exceeded {
        print_warning(&format!(
            "Total log size exceeded threshold of {} MB: {:.3} MB",
            check.threshold_mb, check.total_mb
        ));
    } else {
        print_success(&format!(
            "Total log size {:.3} MB is under the {} MB threshold",
            check.total_mb, check.threshold_mb
        ));
    }
}

pub fn print_prune(report: &PruneReport) {
    if is_json_mode() {
        print_json(report);
        return;
    }
    print_success(&format!(
        "Deleted {} archive(s) older than one week",
        report.deleted
    ));
    if report.failures > 0 {
        print_warning(&format!(
            "{} old archive(s) could not be deleted",
            report.failures
        ));
    }
}

/// Format byte counts for humans
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1}G", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.0}K", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}
