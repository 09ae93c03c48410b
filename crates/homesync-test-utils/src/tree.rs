//! [`TestTree`] builder for homesync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `configs/` source tree and a `home/`
/// target tree, with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use homesync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_source(".vimrc", "set number\n");
/// tree.write_target(".vimrc", "set nonumber\n");
/// tree.assert_target_contains(".vimrc", "nonumber");
/// ```
pub struct TestTree {
    /// Canonical form of the temp dir path, so paths compare equal to the
    /// engine's canonicalized roots
    root: PathBuf,
    _temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create empty `configs/` and `home/` directories in a fresh temp dir.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("configs")).unwrap();
        fs::create_dir_all(root.join("home")).unwrap();
        Self {
            root,
            _temp_dir: temp_dir,
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configs (source) root.
    pub fn configs(&self) -> PathBuf {
        self.root().join("configs")
    }

    /// The home (target) root.
    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    /// Absolute path of a source file.
    pub fn source(&self, rel: &str) -> PathBuf {
        self.configs().join(rel)
    }

    /// Absolute path of a target file.
    pub fn target(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Write a source file, creating parent directories. Returns its path.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        write(&self.source(rel), content)
    }

    /// Write a target file, creating parent directories. Returns its path.
    pub fn write_target(&self, rel: &str, content: &str) -> PathBuf {
        write(&self.target(rel), content)
    }

    /// Read a target file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_target(&self, rel: &str) -> String {
        let path = self.target(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Every file below the home root whose name ends with `.tmp_sync`.
    pub fn staging_files(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();
        collect(&self.home(), &mut found);
        found.retain(|p| p.to_string_lossy().ends_with(".tmp_sync"));
        found
    }

    /// Assert that `rel` exists below the home root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_target_exists(&self, rel: &str) {
        let path = self.target(rel);
        assert!(path.exists(), "Expected target to exist: {}", path.display());
    }

    /// Assert that `rel` does **not** exist below the home root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_target_not_exists(&self, rel: &str) {
        let path = self.target(rel);
        assert!(
            !path.exists(),
            "Expected target NOT to exist: {}",
            path.display()
        );
    }

    /// Assert that the target `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_target_contains(&self, rel: &str, content: &str) {
        let actual = self.read_target(rel);
        assert!(
            actual.contains(content),
            "Target {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            actual
        );
    }

    /// Assert that no staging files remain anywhere below the home root.
    pub fn assert_no_staging_files(&self) {
        let leftovers = self.staging_files();
        assert!(leftovers.is_empty(), "Staging files left behind: {:?}", leftovers);
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

fn collect(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, found);
        } else {
            found.push(path);
        }
    }
}
