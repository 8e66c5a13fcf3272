//! Size monitor: measures residual log volume against the threshold

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use rotarc_core::{Error, Result, SizeCheck};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Recursively sum the sizes of regular files under `log_dir` and
/// compare against `threshold_mb`.
///
/// The boundary is inclusive: a total exactly equal to the threshold
/// counts as exceeded. Individual entries whose metadata cannot be read
/// are skipped; a directory listing failure that prevents completing
/// the sum is fatal to this check.
pub fn check_size(log_dir: &Path, threshold_mb: f64) -> Result<SizeCheck> {
    let total_bytes = sum_dir(log_dir).map_err(|e| Error::SizeCheckFailed {
        path: log_dir.to_path_buf(),
        source: e,
    })?;

    let total_mb = total_bytes as f64 / BYTES_PER_MB;
    let exceeded = total_mb >= threshold_mb;
    debug!(
        "Log volume under {}: {} bytes ({:.3} MB), threshold {} MB",
        log_dir.display(),
        total_bytes,
        total_mb,
        threshold_mb
    );

    Ok(SizeCheck {
        total_bytes,
        total_mb,
        threshold_mb,
        exceeded,
    })
}

fn sum_dir(dir: &Path) -> std::io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        match entry.metadata() {
            Ok(meta) if meta.is_file() => total += meta.len(),
            Ok(meta) if meta.is_dir() => total += sum_dir(&path)?,
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry {}: {}", path.display(), e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_is_zero() {
        let dir = TempDir::new().unwrap();
        let check = check_size(dir.path(), 100.0).unwrap();
        assert_eq!(check.total_bytes, 0);
        assert!(!check.exceeded);
    }

    #[test]
    fn test_sums_recursively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), vec![0u8; 100]).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.log"), vec![0u8; 50]).unwrap();

        let check = check_size(dir.path(), 100.0).unwrap();
        assert_eq!(check.total_bytes, 150);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), vec![0u8; 1024 * 1024]).unwrap();

        // Exactly one megabyte meets a 1.0 MB threshold
        let check = check_size(dir.path(), 1.0).unwrap();
        assert!(check.exceeded);
    }

    #[test]
    fn test_one_byte_under_threshold() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), vec![0u8; 1024 * 1024 - 1]).unwrap();

        let check = check_size(dir.path(), 1.0).unwrap();
        assert!(!check.exceeded);
    }

    #[test]
    fn test_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = check_size(&dir.path().join("missing"), 1.0).unwrap_err();
        assert!(matches!(err, Error::SizeCheckFailed { .. }));
    }
}
