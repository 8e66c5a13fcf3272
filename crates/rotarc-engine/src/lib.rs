//! Rotarc Engine - archiving, size monitoring, and retention pruning
//!
//! One call to [`run`] performs a single rotation cycle:
//! validate the config, archive matching log files into a compressed
//! bundle, measure the residual log volume against the threshold, and
//! prune archive bundles past the retention window. The engine is
//! synchronous and runs each stage to completion; scheduling repeated
//! runs is the caller's concern.

mod archiver;
mod monitor;
mod pruner;

pub use archiver::rotate;
pub use monitor::check_size;
pub use pruner::prune;

use rotarc_core::{Config, Result, RunReport};
use tracing::{error, info};

/// Run one full rotation cycle: archive, size check, prune.
///
/// Config validation failures return `Err` before any filesystem
/// mutation. After validation the three stages are attempted
/// independently: a fatal error in one is recorded in the [`RunReport`]
/// and does not stop the others. Two overlapping runs are not mutually
/// excluded here; callers needing exclusivity must arrange it
/// externally.
pub fn run(config: &Config) -> Result<RunReport> {
    config.validate()?;

    let rotation = rotate(&config.log_dir, &config.archive_dir, &config.pattern);
    match &rotation {
        Ok(report) => info!(
            "Archived {} file(s), {} cleanup failure(s)",
            report.files_archived, report.cleanup_failures
        ),
        Err(e) => error!("Rotation failed: {}", e),
    }

    let size = check_size(&config.log_dir, config.threshold_mb);
    match &size {
        Ok(check) if check.exceeded => info!(
            "Residual log volume {:.3} MB meets or exceeds threshold {} MB",
            check.total_mb, check.threshold_mb
        ),
        Ok(check) => info!("Residual log volume {:.3} MB under threshold", check.total_mb),
        Err(e) => error!("Size check failed: {}", e),
    }

    let prune = prune(&config.archive_dir, config.retention);
    match &prune {
        Ok(report) => info!(
            "Pruned {} archive(s) older than the retention window",
            report.deleted
        ),
        Err(e) => error!("Prune failed: {}", e),
    }

    Ok(RunReport {
        rotation,
        size,
        prune,
    })
}
