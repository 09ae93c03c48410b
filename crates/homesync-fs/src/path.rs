//! Path handling for mirroring the configs tree onto the target tree

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Reserved suffix appended to a target's file name to form its staging path.
pub const STAGING_SUFFIX: &str = ".tmp_sync";

/// A path normalized to use forward slashes internally.
///
/// Used for paths relative to the configs root, so that policy overrides and
/// exclude patterns written as `dir/file` match on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Express `path` relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUnderRoot`] if `path` does not live below `root`.
    pub fn relative(root: &Path, path: &Path) -> Result<Self> {
        let rel = path.strip_prefix(root).map_err(|_| Error::NotUnderRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
        Ok(Self::new(rel))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Non-empty components, in order.
    pub fn components(&self) -> Vec<&str> {
        self.inner
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect()
    }

    /// Directory components, i.e. every component except the file name.
    pub fn parent_components(&self) -> Vec<&str> {
        let mut components = self.components();
        components.pop();
        components
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last().copied()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Resolve `path` to its canonical absolute form.
///
/// Uses `dunce` so Windows paths stay in their familiar non-UNC form.
pub fn canonical(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Canonicalize `path` when it exists; otherwise return it unchanged.
///
/// A target root such as `./debug_home` may not exist before the first sync.
pub fn canonical_or_given(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Map `source` (below `from_root`) onto the same relative location below `to_root`.
///
/// # Errors
///
/// Returns [`Error::NotUnderRoot`] if `source` does not live below `from_root`.
pub fn mirror_path(source: &Path, from_root: &Path, to_root: &Path) -> Result<PathBuf> {
    let rel = source.strip_prefix(from_root).map_err(|_| Error::NotUnderRoot {
        path: source.to_path_buf(),
        root: from_root.to_path_buf(),
    })?;
    Ok(to_root.join(rel))
}

/// Staging path for a target: the target's file name with [`STAGING_SUFFIX`] appended.
///
/// `~/.bashrc` stages to `~/.bashrc.tmp_sync`, `~/a/b.conf` to `~/a/b.conf.tmp_sync`.
pub fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(STAGING_SUFFIX);
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        let path = NormalizedPath::new("nvim\\init.lua");
        assert_eq!(path.as_str(), "nvim/init.lua");
    }

    #[test]
    fn parent_components_excludes_file_name() {
        let path = NormalizedPath::new(".config/nvim/init.lua");
        assert_eq!(path.parent_components(), vec![".config", "nvim"]);
        assert_eq!(path.file_name(), Some("init.lua"));
    }

    #[test]
    fn relative_rejects_foreign_path() {
        let result = NormalizedPath::relative(Path::new("/home/u/configs"), Path::new("/etc/passwd"));
        assert!(matches!(result, Err(Error::NotUnderRoot { .. })));
    }

    #[test]
    fn canonical_resolves_dot_components() {
        let dir = tempfile::tempdir().unwrap();
        let real = canonical(dir.path()).unwrap();
        std::fs::create_dir_all(real.join("configs")).unwrap();

        let dotted = real.join(".").join("configs");
        assert_eq!(canonical(&dotted).unwrap(), real.join("configs"));
        assert_eq!(canonical_or_given(&dotted), real.join("configs"));
    }

    #[test]
    fn canonical_or_given_keeps_missing_path() {
        let missing = Path::new("/definitely/not/here/debug_home");
        assert_eq!(canonical_or_given(missing), missing.to_path_buf());
        assert!(canonical(missing).is_err());
    }

    #[test]
    fn staging_path_keeps_dotfile_name() {
        assert_eq!(
            staging_path(Path::new("/home/u/.bashrc")),
            PathBuf::from("/home/u/.bashrc.tmp_sync")
        );
        assert_eq!(
            staging_path(Path::new("/home/u/.config/app.toml")),
            PathBuf::from("/home/u/.config/app.toml.tmp_sync")
        );
    }
}
