//! Filesystem layer for homesync
//!
//! Provides content hashing, configs-root to target-root path mirroring and
//! the staged/atomic write primitives the sync engine is built on.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use path::{
    NormalizedPath, STAGING_SUFFIX, canonical, canonical_or_given, mirror_path, staging_path,
};
