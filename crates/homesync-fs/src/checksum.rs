//! SHA-256 checksum utilities
//!
//! Every digest stored in the sync state uses the canonical `sha256:<hex>`
//! format produced here, so one state file never mixes algorithms.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &str) -> String {
    digest(content.as_bytes())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying the path if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(digest(&content))
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}
