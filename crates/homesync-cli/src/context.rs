//! Run context resolution
//!
//! Works out the configs root, target root and state file for one run from
//! the command line, the current directory and the user's home directory.

use std::path::{Path, PathBuf};

use homesync_core::Settings;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Name of the configs directory inside the home directory
pub const DEFAULT_CONFIGS_DIR: &str = "configs";

/// Name of the target directory used by `--debug`
pub const DEBUG_HOME_DIR: &str = "debug_home";

/// Directories involved in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Source configs root
    pub configs_root: PathBuf,
    /// Target root the configs tree is mirrored onto
    pub target_root: PathBuf,
    /// Whether the configs root came from the command line or environment
    pub configs_explicit: bool,
}

impl RunContext {
    /// Resolve the context from parsed arguments.
    ///
    /// Relative paths resolve against `cwd`. `home` is only consulted for
    /// defaults that were not given explicitly.
    pub fn resolve(cli: &Cli, cwd: &Path, home: Option<&Path>) -> Result<Self> {
        let home_dir = || {
            home.map(Path::to_path_buf)
                .ok_or_else(|| CliError::user("Could not determine the home directory"))
        };

        let (configs_root, configs_explicit) = match &cli.configs_dir {
            Some(dir) => (cwd.join(dir), true),
            None => (home_dir()?.join(DEFAULT_CONFIGS_DIR), false),
        };

        let target_root = if cli.debug {
            cwd.join(DEBUG_HOME_DIR)
        } else {
            match &cli.target_dir {
                Some(dir) => cwd.join(dir),
                None => home_dir()?,
            }
        };

        Ok(Self {
            configs_root,
            target_root,
            configs_explicit,
        })
    }

    /// Check that the configs root is a directory and, when it was not given
    /// explicitly, that the tool is run from inside it.
    pub fn validate(&self, cwd: &Path) -> Result<()> {
        if !self.configs_root.is_dir() {
            return Err(CliError::user(format!(
                "Configs path {} does not exist or is not a directory.",
                self.configs_root.display()
            )));
        }

        if !self.configs_explicit && !same_dir(cwd, &self.configs_root) {
            return Err(CliError::user(format!(
                "This tool must be run from {}, current directory is {}.",
                self.configs_root.display(),
                cwd.display()
            )));
        }

        Ok(())
    }

    /// State file location under `settings`
    pub fn state_path(&self, settings: &Settings) -> PathBuf {
        settings.state_path(&self.configs_root)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
