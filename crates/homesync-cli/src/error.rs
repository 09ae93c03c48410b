//! Error types for homesync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from homesync-core
    #[error(transparent)]
    Core(#[from] homesync_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A batch sync failed and was rolled back
    #[error("Error during syncing: {source}, sync aborted. Changes rolled back.")]
    SyncAborted {
        #[source]
        source: homesync_core::Error,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
