//! SyncEngine implementation
//!
//! The SyncEngine owns the sync state for one run and applies batches of
//! candidate files to the target tree transactionally: every file is staged
//! first, and targets are replaced only once the whole batch has staged.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use homesync_fs::{canonical, canonical_or_given, io};

use super::candidate::{StagingGuard, SyncCandidate};
use super::report::{FileOutcome, FileReport, SyncReport};
use crate::exclude::ExcludeRule;
use crate::merge::{self, MergeOutcome};
use crate::policy::PolicyAssignment;
use crate::prompt::Prompter;
use crate::settings::{SETTINGS_FILE_NAME, Settings};
use crate::state::{SyncRecord, SyncState};
use crate::Result;

/// Engine for synchronizing a configs tree into a target tree
///
/// The SyncEngine provides:
/// - **scan** / **needs_sync**: find files that are new, modified, or drifted
/// - **sync**: stage, promote and record a batch of files
/// - **state** / **clear_state**: inspect or reset the persisted state
pub struct SyncEngine {
    /// Root of the source configuration files
    pub(super) configs_root: PathBuf,
    /// Directory the configs tree is mirrored onto
    pub(super) target_root: PathBuf,
    /// Location of the persisted state
    state_path: PathBuf,
    /// Engine-owned files under the configs root that are never candidates
    pub(super) reserved: Vec<PathBuf>,
    /// In-memory state, updated by change detection
    pub(super) state: SyncState,
    pub(super) policies: PolicyAssignment,
    pub(super) excludes: Vec<ExcludeRule>,
}

impl SyncEngine {
    /// Create an engine, loading the sync state named by `settings`.
    ///
    /// Both roots are canonicalized, so state keys and `source` directives
    /// are the same however the roots were spelled. A target root that does
    /// not exist yet is used as given.
    ///
    /// # Errors
    ///
    /// Fails if the configs root does not exist, an exclude rule is malformed,
    /// or the state file exists but cannot be read or parsed.
    pub fn new(configs_root: &Path, target_root: &Path, settings: &Settings) -> Result<Self> {
        let configs_root = canonical(configs_root)?;
        let target_root = canonical_or_given(target_root);
        let state_path = settings.state_path(&configs_root);
        let state = SyncState::load(&state_path)?;
        let reserved = vec![
            canonical_or_given(&state_path),
            configs_root.join(SETTINGS_FILE_NAME),
        ];

        Ok(Self {
            configs_root,
            target_root,
            state_path,
            reserved,
            state,
            policies: settings.policy_assignment(),
            excludes: settings.exclude_rules()?,
        })
    }

    /// Get the path to the state file
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Current in-memory state, including records touched by detection
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Clear all state and persist the empty result.
    ///
    /// Returns `false` without writing if there was nothing to clear.
    pub fn clear_state(&mut self) -> Result<bool> {
        if self.state.is_empty() {
            return Ok(false);
        }
        self.state.clear();
        self.state.save(&self.state_path)?;
        tracing::info!(path = %self.state_path.display(), "Cleared sync state");
        Ok(true)
    }

    /// Sync `files` into the target tree as one transaction.
    ///
    /// Files are resolved to canonical paths and duplicates are dropped,
    /// keeping the first occurrence. Each file is merged under its policy and staged next to its target.
    /// Only if every file staged without error are the staging files moved
    /// onto their targets. The on-disk state is then re-read and the records
    /// of applied files are merged into it before saving. Declined files are
    /// left out of the saved state. Staging files are removed on every path
    /// out of this function.
    ///
    /// # Errors
    ///
    /// Any I/O or prompt failure aborts the batch: no further target is
    /// replaced and no state is saved.
    pub fn sync(
        &mut self,
        files: &[PathBuf],
        force: bool,
        prompter: &mut dyn Prompter,
    ) -> Result<SyncReport> {
        let mut seen = BTreeSet::new();
        let mut candidates = Vec::with_capacity(files.len());
        for file in files {
            let source = canonical(file)?;
            if seen.insert(source.clone()) {
                candidates.push(SyncCandidate::new(&source, &self.configs_root, &self.target_root)?);
            }
        }

        let mut guard = StagingGuard::new();
        let mut reports = Vec::with_capacity(candidates.len());

        for candidate in &candidates {
            let policy = self.policies.resolve(&candidate.relative);
            let merged = merge::merge(&candidate.source, &candidate.target, policy, force, prompter)?;

            let outcome = match merged {
                MergeOutcome::Staged(content) => {
                    guard.track(&candidate.staging);
                    merge::stage(&candidate.staging, &content)?;
                    FileOutcome::Synced
                }
                MergeOutcome::Unchanged => FileOutcome::Unchanged,
                MergeOutcome::Declined => FileOutcome::Skipped,
            };
            tracing::info!(file = %candidate.relative, %policy, ?outcome, "Processed candidate");

            reports.push(FileReport {
                source: candidate.source.clone(),
                target: candidate.target.clone(),
                policy,
                outcome,
            });
        }

        for (candidate, report) in candidates.iter().zip(&reports) {
            if report.outcome == FileOutcome::Synced {
                io::promote(&candidate.staging, &candidate.target)?;
                tracing::info!(path = %candidate.target.display(), "Promoted");
            }
        }

        let updated: BTreeMap<String, SyncRecord> = candidates
            .iter()
            .zip(&reports)
            .filter(|(_, report)| report.outcome.is_applied())
            .filter_map(|(candidate, _)| {
                let key = candidate.state_key();
                self.state.get(&key).cloned().map(|record| (key, record))
            })
            .collect();

        // Re-read so records written by others since load are not clobbered
        let mut persisted = SyncState::load(&self.state_path)?;
        persisted.merge(updated.clone());
        persisted.save(&self.state_path)?;
        self.state = persisted;

        drop(guard);

        Ok(SyncReport {
            considered: candidates.len(),
            files: reports,
            updated,
        })
    }
}
