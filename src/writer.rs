//! Atomic persistence of range files.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SyncError;

/// Mode applied to the target directory on every run
pub const DIR_MODE: u32 = 0o755;

/// Ensure the target directory exists with the fixed permission mode.
///
/// The mode is reapplied even when the directory already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(dir).map_err(|e| SyncError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    fs::set_permissions(dir, fs::Permissions::from_mode(DIR_MODE)).map_err(|e| SyncError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Write a list of entries to `dir/name`, one per line.
///
/// The content goes to a temp file in the same directory first and is
/// renamed over the final path, so a partially written file is never
/// observable there. The temp file is removed on every failure path
/// (NamedTempFile cleans up on drop). Returns the number of lines written.
pub fn write_list(dir: &Path, name: &str, entries: &[String]) -> Result<usize, SyncError> {
    let target = dir.join(name);
    let wrap = |e: std::io::Error| SyncError::Write {
        path: target.clone(),
        source: e,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(wrap)?;
    for entry in entries {
        writeln!(temp, "{entry}").map_err(wrap)?;
    }
    temp.as_file().sync_all().map_err(wrap)?;

    temp.persist(&target).map_err(|e| SyncError::Write {
        path: target.clone(),
        source: e.error,
    })?;

    debug!("Persisted {} entries to {:?}", entries.len(), target);
    Ok(entries.len())
}
