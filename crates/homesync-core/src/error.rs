//! Error types for homesync-core

use std::path::PathBuf;

/// Result type for homesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in homesync-core operations
///
/// An operator declining a confirmation prompt is not an error; it surfaces
/// as [`crate::MergeOutcome::Declined`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The persisted sync state exists but cannot be parsed
    #[error("Failed to parse sync state at {path}: {source}")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file exists but cannot be parsed
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// An exclude rule is not a valid glob
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidExcludePattern { pattern: String, message: String },

    /// The confirmation collaborator failed to produce an answer
    #[error("Confirmation prompt failed: {message}")]
    Prompt { message: String },

    // Transparent wrappers for underlying errors
    /// Filesystem error from homesync-fs
    #[error(transparent)]
    Fs(#[from] homesync_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
