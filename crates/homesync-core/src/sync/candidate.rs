//! Sync candidates and staging cleanup

use std::path::{Path, PathBuf};

use homesync_fs::{NormalizedPath, io, mirror_path, staging_path};

use crate::Result;

/// One source file mapped onto its target and staging paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCandidate {
    pub source: PathBuf,
    pub target: PathBuf,
    pub staging: PathBuf,
    /// Source path relative to the configs root
    pub relative: NormalizedPath,
}

impl SyncCandidate {
    /// Mirror `source` from `configs_root` onto `target_root`.
    ///
    /// # Errors
    ///
    /// Fails if `source` is not below `configs_root`.
    pub fn new(source: &Path, configs_root: &Path, target_root: &Path) -> Result<Self> {
        let relative = NormalizedPath::relative(configs_root, source)?;
        let target = mirror_path(source, configs_root, target_root)?;
        let staging = staging_path(&target);
        Ok(Self {
            source: source.to_path_buf(),
            target,
            staging,
            relative,
        })
    }

    /// Key of this candidate in the sync state
    pub fn state_key(&self) -> String {
        self.source.to_string_lossy().into_owned()
    }
}

/// Removes staging files when dropped, whatever path the batch took.
#[derive(Debug, Default)]
pub struct StagingGuard {
    paths: Vec<PathBuf>,
}

impl StagingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a staging path for cleanup
    pub fn track(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    /// Remove every tracked staging file that still exists.
    ///
    /// Failures are logged, not returned: cleanup must not mask the batch result.
    pub fn cleanup(&mut self) {
        for path in self.paths.drain(..) {
            match io::remove_if_exists(&path) {
                Ok(true) => tracing::debug!(path = %path.display(), "Removed staging file"),
                Ok(false) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove staging file"),
            }
        }
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn candidate_mirrors_relative_path() {
        let candidate = SyncCandidate::new(
            Path::new("/home/u/configs/.config/kitty/kitty.conf"),
            Path::new("/home/u/configs"),
            Path::new("/home/u"),
        )
        .unwrap();

        assert_eq!(candidate.target, PathBuf::from("/home/u/.config/kitty/kitty.conf"));
        assert_eq!(
            candidate.staging,
            PathBuf::from("/home/u/.config/kitty/kitty.conf.tmp_sync")
        );
        assert_eq!(candidate.relative.as_str(), ".config/kitty/kitty.conf");
        assert_eq!(candidate.state_key(), "/home/u/configs/.config/kitty/kitty.conf");
    }

    #[test]
    fn candidate_outside_configs_root_is_error() {
        let result = SyncCandidate::new(
            Path::new("/etc/hosts"),
            Path::new("/home/u/configs"),
            Path::new("/home/u"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn guard_removes_files_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join(".vimrc.tmp_sync");
        fs::write(&staged, "x").unwrap();

        {
            let mut guard = StagingGuard::new();
            guard.track(&staged);
            guard.track(&dir.path().join("never-written.tmp_sync"));
        }

        assert!(!staged.exists());
    }
}
