//! Change detection
//!
//! Decides whether a source file is a sync candidate. Whenever the answer is
//! yes, the file's in-memory state record is created or refreshed with the
//! reason; the engine persists those records only after a successful batch.

use std::path::{Path, PathBuf};

use homesync_fs::{NormalizedPath, canonical, compute_file_checksum, mirror_path};
use walkdir::WalkDir;

use super::engine::SyncEngine;
use crate::exclude::is_excluded;
use crate::policy::{Policy, has_source_directive};
use crate::state::SyncRecord;
use crate::Result;

/// Sync reasons recorded in the state file
pub mod reasons {
    pub const NEW_FILE: &str = "New file to be synced";
    pub const SOURCE_MODIFIED: &str = "Source file is modified (hash mismatch) since last sync";
    pub const TARGET_MISSING: &str = "Target file does not exist or is deleted since last sync";
    pub const CONDITION_UNMET: &str = "Target file does not meet the expected condition";
}

impl SyncEngine {
    /// Whether `source` needs syncing.
    ///
    /// The engine's own state and settings files and anything matching an
    /// exclude rule are never candidates, and their state is left untouched.
    /// Otherwise the checks run in order: missing state record, changed source
    /// digest, missing target, and the policy's expected condition on the
    /// target. The first failing check records its reason and returns `true`.
    ///
    /// # Errors
    ///
    /// Fails if `source` does not exist, is outside the configs root, or
    /// cannot be hashed.
    pub fn needs_sync(&mut self, source: &Path) -> Result<bool> {
        let source = canonical(source)?;
        let source = source.as_path();
        let relative = NormalizedPath::relative(&self.configs_root, source)?;

        if self.reserved.iter().any(|path| path == source) {
            tracing::debug!(file = %relative, "Engine-owned file");
            return Ok(false);
        }

        if is_excluded(&self.excludes, &relative) {
            tracing::debug!(file = %relative, "Excluded by pattern");
            return Ok(false);
        }

        let key = source.to_string_lossy().into_owned();
        let current_hash = compute_file_checksum(source)?;

        let Some(record) = self.state.get_mut(&key) else {
            tracing::debug!(file = %relative, "New file");
            self.state
                .insert(key, SyncRecord::new(current_hash, reasons::NEW_FILE));
            return Ok(true);
        };

        if record.hash != current_hash {
            tracing::debug!(file = %relative, "Source modified");
            *record = SyncRecord::new(current_hash, reasons::SOURCE_MODIFIED);
            return Ok(true);
        }

        let target = mirror_path(source, &self.configs_root, &self.target_root)?;
        if !target.exists() {
            tracing::debug!(file = %relative, "Target missing");
            record.touch(reasons::TARGET_MISSING);
            return Ok(true);
        }

        let policy = self.policies.resolve(&relative);
        if !meets_expected_condition(source, &target, policy)? {
            tracing::debug!(file = %relative, %policy, "Target does not meet expected condition");
            record.touch(reasons::CONDITION_UNMET);
            return Ok(true);
        }

        tracing::debug!(file = %relative, "Up to date");
        Ok(false)
    }

    /// Walk the configs root and return every file that needs syncing, sorted.
    ///
    /// Symlinks are not followed: linked directories are not descended into
    /// and linked files are not candidates.
    pub fn scan(&mut self) -> Result<Vec<PathBuf>> {
        let files = list_files_sorted(&self.configs_root)?;

        let mut candidates = Vec::new();
        for file in files {
            if self.needs_sync(&file)? {
                candidates.push(file);
            }
        }
        tracing::info!(count = candidates.len(), "Scanned configs root");
        Ok(candidates)
    }
}

/// Whether an existing target already reflects a sync of `source` under `policy`.
///
/// Prepended targets must carry the `source` directive on their second line;
/// every other policy expects a byte-identical copy of the source. Appended
/// targets therefore never compare equal once they had prior content.
pub fn meets_expected_condition(source: &Path, target: &Path, policy: Policy) -> Result<bool> {
    match policy {
        Policy::PrependSourceStatement => {
            let content = homesync_fs::io::read_text(target)?;
            Ok(has_source_directive(&content, source))
        }
        Policy::Append | Policy::Overwrite => {
            Ok(compute_file_checksum(source)? == compute_file_checksum(target)?)
        }
    }
}

fn list_files_sorted(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            homesync_fs::Error::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
