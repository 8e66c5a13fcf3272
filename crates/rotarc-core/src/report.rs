//! Report types produced by one engine run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::Error;

/// The largest file included in an archive bundle
#[derive(Debug, Clone, Serialize)]
pub struct LargestFile {
    pub name: String,
    pub size_bytes: u64,
}

/// Summary of one archiver run
#[derive(Debug, Clone, Serialize)]
pub struct RotationReport {
    /// Number of files written into the bundle
    pub files_archived: usize,
    /// Largest archived file by original size (first-encountered wins ties)
    pub largest: Option<LargestFile>,
    /// Final path of the published bundle, if one was created
    pub archive_path: Option<PathBuf>,
    /// Source files that could not be deleted after publish
    pub cleanup_failures: usize,
    /// When the rotation ran
    pub timestamp: DateTime<Utc>,
}

impl RotationReport {
    /// Report for a run that found nothing to archive
    pub fn empty() -> Self {
        Self {
            files_archived: 0,
            largest: None,
            archive_path: None,
            cleanup_failures: 0,
            timestamp: Utc::now(),
        }
    }
}

/// Result of measuring residual log volume against the threshold
#[derive(Debug, Clone, Serialize)]
pub struct SizeCheck {
    pub total_bytes: u64,
    pub total_mb: f64,
    pub threshold_mb: f64,
    /// True when total_mb >= threshold_mb (inclusive boundary)
    pub exceeded: bool,
}

/// Summary of one retention pruner run
#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    /// Bundles deleted this run
    pub deleted: usize,
    /// Bundles past the cutoff that could not be deleted
    pub failures: usize,
}

/// Per-stage results of one full engine run
///
/// The three stages are independent: a failure in one does not prevent
/// the others from being attempted.
#[derive(Debug)]
pub struct RunReport {
    pub rotation: Result<RotationReport, Error>,
    pub size: Result<SizeCheck, Error>,
    pub prune: Result<PruneReport, Error>,
}

impl RunReport {
    /// True when every stage completed without a fatal error
    pub fn is_success(&self) -> bool {
        self.rotation.is_ok() && self.size.is_ok() && self.prune.is_ok()
    }
}
