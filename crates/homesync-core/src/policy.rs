//! Merge policies and their per-file assignment

use homesync_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Comment line written above the `source` directive.
pub const SOURCE_HEADER: &str = "# Source personal configs";

/// Strategy for writing a source file into its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Concatenate the source onto the existing target
    Append,
    /// Replace the target with the source
    Overwrite,
    /// Make sure the target starts with a `source "<path>"` directive
    PrependSourceStatement,
}

impl Policy {
    /// Human-readable verb used in prompts and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Append => "Append",
            Self::Overwrite => "Overwrite",
            Self::PrependSourceStatement => "Prepend source statement",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
            Self::PrependSourceStatement => "prepend_source_statement",
        };
        f.write_str(name)
    }
}

/// The `source "<path>"` line expected as the second line of a prepended target.
pub fn source_directive(source: &Path) -> String {
    format!("source \"{}\"", source.display())
}

/// The two-line header prepended to targets under [`Policy::PrependSourceStatement`].
pub fn source_statement(source: &Path) -> String {
    format!("{}\n{}", SOURCE_HEADER, source_directive(source))
}

/// Whether `content` already carries the directive for `source` on its second line.
pub fn has_source_directive(content: &str, source: &Path) -> bool {
    content.lines().nth(1) == Some(source_directive(source).as_str())
}

/// Relative-path overrides on top of a default policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyAssignment {
    default: Policy,
    specific: BTreeMap<String, Policy>,
}

impl PolicyAssignment {
    pub fn new(default: Policy, specific: BTreeMap<String, Policy>) -> Self {
        // Keys are compared in normalized form so `dir\file` and `dir/file` agree
        let specific = specific
            .into_iter()
            .map(|(path, policy)| (NormalizedPath::new(path).as_str().to_string(), policy))
            .collect();
        Self { default, specific }
    }

    /// Policy for a path relative to the configs root.
    pub fn resolve(&self, relative: &NormalizedPath) -> Policy {
        self.specific
            .get(relative.as_str())
            .copied()
            .unwrap_or(self.default)
    }
}
