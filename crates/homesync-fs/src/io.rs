//! Staged and atomic I/O operations

use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Replace `path` with `content` in one rename, holding an advisory lock
/// while the temporary file is written.
///
/// The temporary file lives next to `path` and is removed if anything fails
/// before it is persisted.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    create_parent_dirs(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    let lock_failed = || Error::LockFailed {
        path: path.to_path_buf(),
    };

    temp.as_file().lock_exclusive().map_err(|_| lock_failed())?;
    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    FileExt::unlock(temp.as_file()).map_err(|_| lock_failed())?;

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Create every missing parent directory of `path`.
pub fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Write merged content to a staging path, creating parent directories.
///
/// The staging file is a plain write: it only becomes visible under its real
/// name through [`promote`].
pub fn write_staged(staging: &Path, content: &str) -> Result<()> {
    create_parent_dirs(staging)?;
    fs::write(staging, content).map_err(|e| Error::io(staging, e))
}

/// Move a staging file onto its target, replacing the target if it exists.
pub fn promote(staging: &Path, target: &Path) -> Result<()> {
    fs::rename(staging, target).map_err(|e| Error::io(target, e))
}

/// Remove a file if it exists. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
