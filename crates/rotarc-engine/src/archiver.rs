//! Archiver: collects log files into a compressed bundle and publishes
//! it atomically
//!
//! The bundle is written to a scratch file inside the archive directory
//! so the final rename stays on one filesystem; a reader of the archive
//! directory sees either no new entry or the complete bundle, never a
//! partial one. Source files are deleted only after the rename
//! succeeds.

use chrono::{Local, Utc};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use rotarc_core::{archive_name, Error, LargestFile, Result, RotationReport, TIMESTAMP_FORMAT};

/// A log file discovered at scan time
#[derive(Debug)]
struct LogFile {
    path: PathBuf,
    name: String,
    size: u64,
}

/// Archive every file under `log_dir` matching `pattern` into one
/// compressed bundle in `archive_dir`, then delete the sources.
///
/// The scan is non-recursive. When no files match, no bundle is created
/// and the report shows zero files archived. A source that disappears
/// between scan and write is skipped with a warning; the copy of a file
/// a writer is still appending to is a best-effort snapshot.
pub fn rotate(log_dir: &Path, archive_dir: &Path, pattern: &str) -> Result<RotationReport> {
    let files = scan(log_dir, pattern)?;
    if files.is_empty() {
        debug!("No files matching {} under {}", pattern, log_dir.display());
        return Ok(RotationReport::empty());
    }

    let timestamp = Utc::now();
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let nominal_path = archive_dir.join(archive_name(&stamp));

    let mut scratch = NamedTempFile::new_in(archive_dir).map_err(|e| {
        Error::ArchiveCreationFailed {
            path: archive_dir.to_path_buf(),
            source: e,
        }
    })?;

    let written = write_bundle(&mut scratch, &files).map_err(|e| Error::ArchiveCreationFailed {
        path: nominal_path.clone(),
        source: e,
    })?;

    if written.is_empty() {
        // Everything vanished between scan and write; drop the scratch.
        warn!("All matched files disappeared before archiving");
        return Ok(RotationReport::empty());
    }

    let final_path = publish(scratch, archive_dir, &stamp)?;
    debug!("Published archive {}", final_path.display());

    // First-encountered file wins a size tie
    let mut largest: Option<&LogFile> = None;
    for &file in &written {
        if largest.map_or(true, |best| file.size > best.size) {
            largest = Some(file);
        }
    }
    let largest = largest.map(|f| LargestFile {
        name: f.name.clone(),
        size_bytes: f.size,
    });

    let mut cleanup_failures = 0;
    for file in &written {
        if let Err(e) = fs::remove_file(&file.path) {
            warn!("Couldn't delete {} after archiving: {}", file.path.display(), e);
            cleanup_failures += 1;
        }
    }

    Ok(RotationReport {
        files_archived: written.len(),
        largest,
        archive_path: Some(final_path),
        cleanup_failures,
        timestamp,
    })
}

/// Attempts at suffix-disambiguating a colliding bundle name before
/// giving up
const MAX_PUBLISH_ATTEMPTS: u32 = 1000;

/// Atomically rename the scratch file to its final name, never
/// replacing a bundle already published under that name.
///
/// Timestamps have one-second resolution, so a second rotation within
/// the same second would land on the same path; the name gets a
/// numeric suffix instead (`archiveLogs.<ts>-1.zip`, `-2`, ...).
fn publish(mut scratch: NamedTempFile, archive_dir: &Path, stamp: &str) -> Result<PathBuf> {
    for attempt in 0..MAX_PUBLISH_ATTEMPTS {
        let name = if attempt == 0 {
            archive_name(stamp)
        } else {
            archive_name(&format!("{}-{}", stamp, attempt))
        };
        let candidate = archive_dir.join(name);

        match scratch.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!("Archive name taken, retrying: {}", candidate.display());
                scratch = e.file;
            }
            Err(e) => {
                return Err(Error::ArchivePublishFailed {
                    path: candidate,
                    source: e.error,
                })
            }
        }
    }
    Err(Error::ArchivePublishFailed {
        path: archive_dir.join(archive_name(stamp)),
        source: io::Error::new(
            io::ErrorKind::AlreadyExists,
            "every candidate archive name is taken",
        ),
    })
}

/// Enumerate regular files directly under `log_dir` whose base name
/// matches the pattern
fn scan(log_dir: &Path, pattern: &str) -> Result<Vec<LogFile>> {
    let matcher = glob::Pattern::new(pattern)
        .map_err(|e| Error::config(format!("invalid log file pattern {}: {}", pattern, e)))?;

    let entries = fs::read_dir(log_dir).map_err(|e| Error::ArchiveCreationFailed {
        path: log_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::ArchiveCreationFailed {
            path: log_dir.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !matcher.matches(&name) {
            continue;
        }
        match entry.metadata() {
            Ok(meta) if meta.is_file() => files.push(LogFile {
                path: entry.path(),
                name,
                size: meta.len(),
            }),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry {}: {}", entry.path().display(), e),
        }
    }
    Ok(files)
}

/// Write the bundle into the scratch file and flush it to disk.
/// Returns the files actually written; sources that vanished since the
/// scan are skipped.
fn write_bundle<'a>(
    scratch: &mut NamedTempFile,
    files: &'a [LogFile],
) -> io::Result<Vec<&'a LogFile>> {
    let mut zip = ZipWriter::new(scratch.as_file_mut());
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        if !file.path.is_file() {
            warn!("Skipping {}: no longer a regular file", file.path.display());
            continue;
        }
        let mut src = match File::open(&file.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Skipping {}: disappeared before write", file.path.display());
                continue;
            }
            Err(e) => return Err(e),
        };

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(file.name.as_str(), options)
            .map_err(io::Error::other)?;
        io::copy(&mut src, &mut zip)?;
        debug!("Added {} ({} bytes)", file.name, file.size);
        written.push(file);
    }

    zip.finish().map_err(io::Error::other)?;
    scratch.as_file().sync_all()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn read_entry(archive: &Path, name: &str) -> Vec<u8> {
        let file = File::open(archive).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_rotate_empty_dir_creates_no_archive() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();

        let report = rotate(logs.path(), archives.path(), "*.log").unwrap();
        assert_eq!(report.files_archived, 0);
        assert!(report.archive_path.is_none());
        assert_eq!(fs::read_dir(archives.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rotate_archives_and_deletes_sources() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        write_file(logs.path(), "a.log", b"0123456789");
        write_file(logs.path(), "b.log", b"01234567890123456789");
        write_file(logs.path(), "notes.txt", b"kept");

        let report = rotate(logs.path(), archives.path(), "*.log").unwrap();
        assert_eq!(report.files_archived, 2);
        assert_eq!(report.cleanup_failures, 0);
        let largest = report.largest.unwrap();
        assert_eq!(largest.name, "b.log");
        assert_eq!(largest.size_bytes, 20);

        let archive = report.archive_path.unwrap();
        assert!(rotarc_core::is_archive_name(
            archive.file_name().unwrap().to_str().unwrap()
        ));
        assert_eq!(read_entry(&archive, "a.log"), b"0123456789");
        assert_eq!(read_entry(&archive, "b.log"), b"01234567890123456789");

        // Sources removed, non-matching file untouched
        assert!(!logs.path().join("a.log").exists());
        assert!(!logs.path().join("b.log").exists());
        assert!(logs.path().join("notes.txt").exists());
    }

    #[test]
    fn test_rotate_missing_archive_dir_leaves_sources() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        write_file(logs.path(), "a.log", b"data");
        let missing = archives.path().join("missing");

        let err = rotate(logs.path(), &missing, "*.log").unwrap_err();
        assert!(matches!(err, Error::ArchiveCreationFailed { .. }));
        assert!(logs.path().join("a.log").exists());
        // No scratch or partial archive left behind
        assert_eq!(fs::read_dir(archives.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rotate_largest_tie_keeps_first() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        write_file(logs.path(), "a.log", b"12345");
        write_file(logs.path(), "b.log", b"67890");

        let report = rotate(logs.path(), archives.path(), "*.log").unwrap();
        let largest = report.largest.unwrap();
        assert_eq!(largest.size_bytes, 5);
        // read_dir order is platform-dependent; the tie just has to be
        // broken by encounter order, i.e. one of the two names.
        assert!(largest.name == "a.log" || largest.name == "b.log");
    }

    #[test]
    fn test_rotate_custom_pattern() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        write_file(logs.path(), "trace.txt", b"traced");
        write_file(logs.path(), "a.log", b"logged");

        let report = rotate(logs.path(), archives.path(), "*.txt").unwrap();
        assert_eq!(report.files_archived, 1);
        let archive = report.archive_path.unwrap();
        assert_eq!(read_entry(&archive, "trace.txt"), b"traced");
        assert!(logs.path().join("a.log").exists());
    }

    #[test]
    fn test_publish_never_replaces_existing_bundle() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        write_file(logs.path(), "a.log", b"fresh rotation");

        // Occupy the names this rotation could pick, covering a second
        // boundary crossed mid-test
        let mut taken = Vec::new();
        for offset in 0..=1 {
            let stamp = (Local::now() + chrono::Duration::seconds(offset))
                .format(TIMESTAMP_FORMAT)
                .to_string();
            let path = archives.path().join(archive_name(&stamp));
            fs::write(&path, b"previously published").unwrap();
            taken.push(path);
        }

        let report = rotate(logs.path(), archives.path(), "*.log").unwrap();
        let published = report.archive_path.unwrap();

        // The new bundle landed on a disambiguated name and the old
        // bundles kept their bytes
        assert!(!taken.contains(&published));
        assert_eq!(read_entry(&published, "a.log"), b"fresh rotation");
        for path in &taken {
            assert_eq!(fs::read(path).unwrap(), b"previously published");
        }
    }

    #[test]
    fn test_back_to_back_rotations_keep_both_bundles() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();

        write_file(logs.path(), "a.log", b"first batch");
        let first = rotate(logs.path(), archives.path(), "*.log").unwrap();
        write_file(logs.path(), "b.log", b"second batch");
        let second = rotate(logs.path(), archives.path(), "*.log").unwrap();

        // Both runs usually share a wall-clock second; each must still
        // publish its own bundle
        let first_path = first.archive_path.unwrap();
        let second_path = second.archive_path.unwrap();
        assert_ne!(first_path, second_path);
        assert_eq!(read_entry(&first_path, "a.log"), b"first batch");
        assert_eq!(read_entry(&second_path, "b.log"), b"second batch");
    }

    #[test]
    fn test_rotate_skips_subdirectories() {
        let logs = TempDir::new().unwrap();
        let archives = TempDir::new().unwrap();
        fs::create_dir(logs.path().join("nested.log")).unwrap();
        write_file(logs.path(), "a.log", b"data");

        let report = rotate(logs.path(), archives.path(), "*.log").unwrap();
        assert_eq!(report.files_archived, 1);
        assert!(logs.path().join("nested.log").is_dir());
    }
}
