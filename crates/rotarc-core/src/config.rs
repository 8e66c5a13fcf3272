//! Configuration file parsing and resolution for rotarc
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)
//!
//! Values are resolved by merging built-in defaults, the config file,
//! and command-line overrides, in that order. The resolved `Config` is
//! immutable for the rest of the run.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Configuration file structure (rotarc.toml/yaml/json)
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Directory for the whole project (holds rotarc's own log)
    pub main_dir: Option<String>,
    /// Directory where log files accumulate
    pub log_dir: Option<String>,
    /// Directory where archive bundles are placed
    pub archive_dir: Option<String>,
    /// Warning threshold in megabytes
    pub threshold_mb: Option<f64>,
    /// Glob pattern selecting log files for rotation
    pub pattern: Option<String>,
}

impl ConfigFile {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::config(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Look for a config file with a well-known name in the given directory
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// Command-line overrides applied on top of the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub main_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub archive_dir: Option<PathBuf>,
    pub threshold_mb: Option<f64>,
    pub pattern: Option<String>,
}

/// Resolved configuration the engine operates on
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the whole project
    pub main_dir: PathBuf,
    /// Directory where log files accumulate
    pub log_dir: PathBuf,
    /// Directory where archive bundles are placed
    pub archive_dir: PathBuf,
    /// Warning threshold in megabytes
    pub threshold_mb: f64,
    /// Glob pattern selecting log files for rotation
    pub pattern: String,
    /// Retention window for archive bundles (fixed at 7 days)
    pub retention: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_dir: default_main_dir(),
            log_dir: default_log_dir(),
            archive_dir: default_archive_dir(),
            threshold_mb: DEFAULT_THRESHOLD_MB,
            pattern: DEFAULT_LOG_PATTERN.to_string(),
            retention: retention(),
        }
    }
}

impl Config {
    /// Merge defaults, config file values, and command-line overrides
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
        let defaults = Config::default();

        let main_dir = overrides
            .main_dir
            .or_else(|| file.main_dir.as_deref().map(expand_tilde))
            .unwrap_or(defaults.main_dir);
        let log_dir = overrides
            .log_dir
            .or_else(|| file.log_dir.as_deref().map(expand_tilde))
            .unwrap_or(defaults.log_dir);
        let archive_dir = overrides
            .archive_dir
            .or_else(|| file.archive_dir.as_deref().map(expand_tilde))
            .unwrap_or(defaults.archive_dir);

        Self {
            main_dir,
            log_dir,
            archive_dir,
            threshold_mb: overrides
                .threshold_mb
                .or(file.threshold_mb)
                .unwrap_or(defaults.threshold_mb),
            pattern: overrides
                .pattern
                .or(file.pattern)
                .unwrap_or(defaults.pattern),
            retention: defaults.retention,
        }
    }

    /// Create the log and archive directories under an existing main directory
    pub fn ensure_dirs(&self) -> Result<()> {
        if !self.main_dir.is_dir() {
            return Err(Error::config(format!(
                "main directory not found: {}",
                self.main_dir.display()
            )));
        }
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(&self.archive_dir)?;
        Ok(())
    }

    /// Validate the configuration before any filesystem mutation
    pub fn validate(&self) -> Result<()> {
        for (label, dir) in [
            ("main directory", &self.main_dir),
            ("log directory", &self.log_dir),
            ("archive directory", &self.archive_dir),
        ] {
            if !dir.is_dir() {
                return Err(Error::config(format!(
                    "{} not found: {}",
                    label,
                    dir.display()
                )));
            }
        }

        for (label, dir) in [
            ("main directory", &self.main_dir),
            ("log directory", &self.log_dir),
            ("archive directory", &self.archive_dir),
        ] {
            let meta = std::fs::metadata(dir).map_err(|e| {
                Error::config(format!("{} not accessible: {}: {}", label, dir.display(), e))
            })?;
            if meta.permissions().readonly() {
                return Err(Error::config(format!(
                    "{} is not writable: {}",
                    label,
                    dir.display()
                )));
            }
        }

        if !self.threshold_mb.is_finite() || self.threshold_mb < 0.0 {
            return Err(Error::config(format!(
                "threshold_mb must be a finite non-negative number, got {}",
                self.threshold_mb
            )));
        }

        if glob::Pattern::new(&self.pattern).is_err() {
            return Err(Error::config(format!(
                "invalid log file pattern: {}",
                self.pattern
            )));
        }

        Ok(())
    }

    /// Path of rotarc's own action log
    pub fn script_log_path(&self) -> PathBuf {
        self.main_dir.join(SCRIPT_LOG_FILE)
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
