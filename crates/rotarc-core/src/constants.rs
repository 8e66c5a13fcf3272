//! Constants and default values for rotarc

use std::path::PathBuf;
use std::time::Duration;

/// Default warning threshold for residual log volume, in megabytes
pub const DEFAULT_THRESHOLD_MB: f64 = 100.0;

/// Retention window for archive bundles, in days (fixed in current scope)
pub const RETENTION_DAYS: u64 = 7;

/// Prefix of every archive bundle name
pub const ARCHIVE_PREFIX: &str = "archiveLogs";

/// Extension of every archive bundle
pub const ARCHIVE_EXT: &str = "zip";

/// Timestamp format embedded in archive bundle names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Default glob pattern selecting log files for rotation
pub const DEFAULT_LOG_PATTERN: &str = "*.log";

/// File name of rotarc's own action log, placed under the main directory
pub const SCRIPT_LOG_FILE: &str = "rotarc.log";

/// Default project directory name under the home directory
pub const ROTARC_DIR: &str = "rotarc";

/// Default log directory name under the main directory
pub const LOG_DIR: &str = "log";

/// Default archive directory name under the main directory
pub const ARCHIVE_DIR: &str = "archive";

/// Config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "rotarc.toml",
    "rotarc.yaml",
    "rotarc.yml",
    "rotarc.json",
];

/// Retention window as a duration
pub fn retention() -> Duration {
    Duration::from_secs(RETENTION_DAYS * 86_400)
}

/// Get the default main directory
pub fn default_main_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(ROTARC_DIR))
        .unwrap_or_else(|| PathBuf::from(ROTARC_DIR))
}

/// Get the default log directory
pub fn default_log_dir() -> PathBuf {
    default_main_dir().join(LOG_DIR)
}

/// Get the default archive directory
pub fn default_archive_dir() -> PathBuf {
    default_main_dir().join(ARCHIVE_DIR)
}

/// Build an archive bundle file name for a formatted timestamp
pub fn archive_name(timestamp: &str) -> String {
    format!("{}.{}.{}", ARCHIVE_PREFIX, timestamp, ARCHIVE_EXT)
}

/// Check whether a file name looks like an archive bundle produced by rotarc
pub fn is_archive_name(name: &str) -> bool {
    name.starts_with(ARCHIVE_PREFIX) && name.ends_with(ARCHIVE_EXT)
}
