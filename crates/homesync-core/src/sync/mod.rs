//! SyncEngine for coordinating state between the configs tree and the target tree
//!
//! This module provides:
//! - **detect**: decide which source files need syncing, updating in-memory state
//! - **candidate**: source/target/staging triples and the staging cleanup guard
//! - **engine**: the transactional batch sync and state inspection
//! - **report**: per-file outcomes of a batch

mod candidate;
mod detect;
mod engine;
mod report;

pub use candidate::{StagingGuard, SyncCandidate};
pub use detect::reasons;
pub use engine::SyncEngine;
pub use report::{FileOutcome, FileReport, SyncReport};
