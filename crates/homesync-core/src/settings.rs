//! Run settings parsed from `homesync.toml`
//!
//! The settings file lives at the root of the configs directory. Every field
//! is optional; a missing file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::exclude::ExcludeRule;
use crate::policy::{Policy, PolicyAssignment};
use crate::{Error, Result};

/// Name of the settings file inside the configs root
pub const SETTINGS_FILE_NAME: &str = "homesync.toml";

/// Default state file name, relative to the configs root
pub const DEFAULT_STATE_FILE: &str = ".sync_state.json";

const DEFAULT_EXCLUDES: &[&str] = &[
    ".git/",
    "__pycache__/",
    "debug_home/",
    ".gitignore",
    DEFAULT_STATE_FILE,
    "setup.py",
    "setup.sh",
    "README.md",
    SETTINGS_FILE_NAME,
];

const DEFAULT_PREPENDED: &[&str] = &[".bashrc", ".zshrc"];

/// Configuration for one sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Policy for files without an entry in `policies`
    pub default_policy: Policy,

    /// State file location; relative paths resolve against the configs root
    pub state_file: PathBuf,

    /// Exclude rules (`dir/` for directory names, anything else is a glob)
    pub exclude: Vec<String>,

    /// Per-file policy overrides keyed by path relative to the configs root
    pub policies: BTreeMap<String, Policy>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_policy: Policy::Overwrite,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| (*s).to_string()).collect(),
            policies: DEFAULT_PREPENDED
                .iter()
                .map(|s| ((*s).to_string(), Policy::PrependSourceStatement))
                .collect(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use homesync_core::{Policy, Settings};
    ///
    /// let settings = Settings::parse(r#"
    /// default_policy = "append"
    ///
    /// [policies]
    /// ".profile" = "prepend_source_statement"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.default_policy, Policy::Append);
    /// assert_eq!(settings.policies[".profile"], Policy::PrependSourceStatement);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: PathBuf::from(SETTINGS_FILE_NAME),
            message: e.to_string(),
        })
    }

    /// Load `homesync.toml` from the configs root, or defaults if it is absent
    pub fn load(configs_root: &Path) -> Result<Self> {
        let path = configs_root.join(SETTINGS_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = homesync_fs::io::read_text(&path)?;
        let settings = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Absolute location of the state file for `configs_root`
    pub fn state_path(&self, configs_root: &Path) -> PathBuf {
        configs_root.join(&self.state_file)
    }

    pub fn policy_assignment(&self) -> PolicyAssignment {
        PolicyAssignment::new(self.default_policy, self.policies.clone())
    }

    pub fn exclude_rules(&self) -> Result<Vec<ExcludeRule>> {
        ExcludeRule::parse_all(&self.exclude)
    }
}
