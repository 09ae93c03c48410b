//! Batch sync reports

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::policy::Policy;
use crate::state::SyncRecord;

/// What happened to one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Merged content was staged and promoted
    Synced,
    /// The target already satisfied its policy
    Unchanged,
    /// The operator declined the prompt
    Skipped,
}

impl FileOutcome {
    /// Whether the file counts as synced for state persistence
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Synced | Self::Unchanged)
    }
}

/// Outcome for one candidate
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub policy: Policy,
    pub outcome: FileOutcome,
}

/// Report from a successful batch sync
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Number of candidate files handed to the batch
    pub considered: usize,
    /// Per-file outcomes, in candidate order
    pub files: Vec<FileReport>,
    /// State records persisted by this batch, keyed by source path
    pub updated: BTreeMap<String, SyncRecord>,
}

impl SyncReport {
    /// Number of files synced or already up to date
    pub fn applied_count(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_applied()).count()
    }

    /// Number of files the operator declined
    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Skipped)
            .count()
    }
}
