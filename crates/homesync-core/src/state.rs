//! Persistent sync state
//!
//! The state file maps the absolute path of every source file the engine has
//! seen to the digest it had when it was last flagged for syncing, when that
//! happened and why. It is pretty-printed JSON so it can be inspected by hand.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::path::Path;

use crate::{Error, Result};

/// Per-file sync record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    /// Content digest of the source file (`sha256:<hex>`)
    pub hash: String,
    /// ISO-8601 timestamp of the last sync decision
    #[serde(rename = "last sync timestamp")]
    pub last_sync_timestamp: String,
    /// Why the file was last flagged for syncing
    #[serde(rename = "sync reason")]
    pub sync_reason: String,
}

impl SyncRecord {
    /// Create a record stamped with the current local time
    pub fn new(hash: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            last_sync_timestamp: now(),
            sync_reason: reason.into(),
        }
    }

    /// Re-stamp the record with a new reason, keeping the stored hash
    pub fn touch(&mut self, reason: impl Into<String>) {
        self.last_sync_timestamp = now();
        self.sync_reason = reason.into();
    }
}

fn now() -> String {
    Local::now().to_rfc3339()
}

/// Mapping from absolute source path to its [`SyncRecord`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState {
    entries: BTreeMap<String, SyncRecord>,
}

impl SyncState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Load state from `path`, or an empty state if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateParse`] if the file exists but is not valid state
    /// JSON, and an I/O error if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No sync state file, starting empty");
            return Ok(Self::new());
        }

        let content = homesync_fs::io::read_text(path)?;
        serde_json::from_str(&content).map_err(|source| Error::StateParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the state to `path` atomically, indented by four spaces
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_pretty_json()?;
        homesync_fs::io::write_atomic(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), entries = self.len(), "Saved sync state");
        Ok(())
    }

    /// Render the state as four-space indented JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        render_pretty(&self.entries)
    }

    pub fn get(&self, source: &str) -> Option<&SyncRecord> {
        self.entries.get(source)
    }

    pub fn get_mut(&mut self, source: &str) -> Option<&mut SyncRecord> {
        self.entries.get_mut(source)
    }

    pub fn insert(&mut self, source: impl Into<String>, record: SyncRecord) -> Option<SyncRecord> {
        self.entries.insert(source.into(), record)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    /// Overlay `updates` onto this state, replacing records with the same key
    pub fn merge(&mut self, updates: BTreeMap<String, SyncRecord>) {
        self.entries.extend(updates);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SyncRecord)> {
        self.entries.iter()
    }
}

/// Four-space indented JSON, matching the layout of hand-maintained state files.
pub fn render_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
