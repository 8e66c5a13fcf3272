//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rotarc_core::{ConfigFile, Overrides};

#[derive(Parser)]
#[command(name = "rotarc")]
#[command(version, about = "Log rotation: archive, size-check, and prune log directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (.toml, .yaml, .yml, or .json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the whole project
    #[arg(long, global = true)]
    pub main_dir: Option<PathBuf>,

    /// Directory where log files are stored
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Directory where archive bundles will be saved
    #[arg(long, global = true)]
    pub archive_dir: Option<PathBuf>,

    /// Threshold size in MB for logging a warning
    #[arg(long, global = true)]
    pub threshold_mb: Option<f64>,

    /// Glob pattern selecting log files to rotate
    #[arg(long, global = true)]
    pub pattern: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Don't write rotarc's own action log under the main directory
    #[arg(long, global = true)]
    pub no_log_file: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one full rotation cycle: archive, size check, prune
    Run,

    /// Archive matching log files into a compressed bundle
    Archive,

    /// Measure log volume against the warning threshold
    Check,

    /// Delete archive bundles older than the retention window
    Prune,
}

impl Cli {
    /// Command-line overrides for config resolution
    pub fn overrides(&self) -> Overrides {
        Overrides {
            main_dir: self.main_dir.clone(),
            log_dir: self.log_dir.clone(),
            archive_dir: self.archive_dir.clone(),
            threshold_mb: self.threshold_mb,
            pattern: self.pattern.clone(),
        }
    }

    /// Load the named config file, or discover one in the working directory
    pub fn config_file(&self) -> rotarc_core::Result<ConfigFile> {
        if let Some(path) = &self.config {
            return ConfigFile::load(path);
        }
        match std::env::current_dir()
            .ok()
            .and_then(|dir| ConfigFile::discover(&dir))
        {
            Some(path) => ConfigFile::load(&path),
            None => Ok(ConfigFile::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "rotarc",
            "run",
            "--threshold-mb",
            "50",
            "--log-dir",
            "/var/log/app",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.threshold_mb, Some(50.0));
        assert_eq!(overrides.log_dir.as_deref(), Some(Path::new("/var/log/app")));
        assert!(overrides.pattern.is_none());
    }
}
