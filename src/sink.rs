// ABOUTME: Dump output handling: atomic file writes and default export names
// ABOUTME: Writes through a temp file so a failed export never truncates an old dump

use crate::dump::DumpDocument;
use crate::error::{BackupError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `document` to `path` atomically.
///
/// Missing parent directories are created. The document lands in a temp file
/// beside the target first and is renamed into place, so an interrupted run
/// leaves any previous dump at `path` untouched.
pub fn write_to_path(document: &DumpDocument, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(document.as_bytes())?;
    tmp.persist(path).map_err(|e| BackupError::Io(e.error))?;

    tracing::info!("Wrote {} bytes to {}", document.len(), path.display());

    Ok(())
}

/// Default dump file name: `{database}_db_backup_(HH-MM-SS_DD-MM-YYYY).sql`,
/// stamped with the local time so repeated exports never collide.
pub fn default_export_name(database: &str) -> String {
    let now = chrono::Local::now();
    format!(
        "{}_db_backup_({}_{}).sql",
        database,
        now.format("%H-%M-%S"),
        now.format("%d-%m-%Y")
    )
}
