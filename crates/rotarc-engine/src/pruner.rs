//! Retention pruner: deletes archive bundles past the retention window

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use rotarc_core::{Error, PruneReport, Result};

/// Delete every regular file under `archive_dir` whose modification
/// time is strictly older than `now - max_age`.
///
/// Directories and entries without a readable modification time are
/// skipped. A failure to delete one entry is logged and counted but
/// does not stop the remaining deletions; only a failure to enumerate
/// the directory itself is fatal. Running twice with no new archives
/// deletes nothing the second time.
pub fn prune(archive_dir: &Path, max_age: Duration) -> Result<PruneReport> {
    let cutoff = SystemTime::now() - max_age;
    let entries = fs::read_dir(archive_dir).map_err(|e| Error::PruneEnumerationFailed {
        path: archive_dir.to_path_buf(),
        source: e,
    })?;

    let mut deleted = 0;
    let mut failures = 0;
    for entry in entries {
        let entry = entry.map_err(|e| Error::PruneEnumerationFailed {
            path: archive_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        let meta = match entry.metadata() {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => continue,
            Err(e) => {
                warn!("Skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        };
        let modified = match meta.modified() {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping {}: no modification time: {}", path.display(), e);
                continue;
            }
        };

        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!("Deleted old archive: {}", path.display());
                    deleted += 1;
                }
                Err(e) => {
                    warn!("Couldn't delete old archive {}: {}", path.display(), e);
                    failures += 1;
                }
            }
        }
    }

    Ok(PruneReport { deleted, failures })
}
