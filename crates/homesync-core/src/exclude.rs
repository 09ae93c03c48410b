//! Exclude rules for files under the configs root
//!
//! A rule written with a trailing slash (`.git/`) excludes every file that has
//! a directory of that name anywhere in its relative path. Any other rule is a
//! glob matched from the right, one path component per pattern component, so
//! `README.md` excludes `README.md` and `docs/README.md` alike.

use glob::{MatchOptions, Pattern};
use homesync_fs::NormalizedPath;

use crate::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single caller-supplied exclusion.
#[derive(Debug, Clone)]
pub enum ExcludeRule {
    /// Directory name excluded at any depth
    Dir(String),
    /// Right-anchored glob over path components
    Glob {
        source: String,
        anchored: bool,
        components: Vec<Pattern>,
    },
}

impl ExcludeRule {
    /// Parse a rule from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExcludePattern`] for an empty rule or a malformed glob.
    pub fn parse(rule: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidExcludePattern {
            pattern: rule.to_string(),
            message: message.to_string(),
        };

        if let Some(dir) = rule.strip_suffix('/') {
            let dir = dir.trim_matches('/');
            if dir.is_empty() || dir.contains('/') {
                return Err(invalid("directory rules must name a single directory"));
            }
            return Ok(Self::Dir(dir.to_string()));
        }

        let normalized = NormalizedPath::new(rule);
        let components = normalized
            .components()
            .into_iter()
            .map(|c| Pattern::new(c).map_err(|e| invalid(e.msg)))
            .collect::<Result<Vec<_>>>()?;
        if components.is_empty() {
            return Err(invalid("empty pattern"));
        }

        Ok(Self::Glob {
            source: rule.to_string(),
            anchored: normalized.as_str().starts_with('/'),
            components,
        })
    }

    /// Parse every rule in order.
    pub fn parse_all<S: AsRef<str>>(rules: &[S]) -> Result<Vec<Self>> {
        rules.iter().map(|r| Self::parse(r.as_ref())).collect()
    }

    /// Whether `relative` (a path relative to the configs root) is excluded by this rule.
    pub fn matches(&self, relative: &NormalizedPath) -> bool {
        match self {
            Self::Dir(name) => relative
                .parent_components()
                .iter()
                .any(|component| component == name),
            Self::Glob {
                anchored,
                components,
                ..
            } => {
                let path = relative.components();
                if components.len() > path.len() || (*anchored && components.len() != path.len()) {
                    return false;
                }
                components
                    .iter()
                    .rev()
                    .zip(path.iter().rev())
                    .all(|(pattern, component)| pattern.matches_with(component, MATCH_OPTIONS))
            }
        }
    }
}

impl std::fmt::Display for ExcludeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dir(name) => write!(f, "{}/", name),
            Self::Glob { source, .. } => f.write_str(source),
        }
    }
}

/// Whether any rule in `rules` excludes `relative`.
pub fn is_excluded(rules: &[ExcludeRule], relative: &NormalizedPath) -> bool {
    rules.iter().any(|rule| rule.matches(relative))
}
