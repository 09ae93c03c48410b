//! State-tracked synchronization engine for homesync
//!
//! This crate decides which files under a configs root need to be copied into
//! a target tree, merges them according to per-file policies and applies a
//! whole batch transactionally:
//!
//! - **Policy resolution**: exact relative-path overrides over a default policy
//! - **Merge engine**: computes merged target content without touching the live target
//! - **Change detection**: exclude rules plus hash/target checks against the sync state
//! - **Batch sync**: stage everything, promote only if every file staged, persist state
//!
//! # Architecture
//!
//! ```text
//!                 homesync-cli
//!                      |
//!                homesync-core
//!                      |
//!                 homesync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use homesync_core::{AlwaysYes, Settings, SyncEngine};
//! use std::path::Path;
//!
//! fn example() -> homesync_core::Result<()> {
//!     let configs = Path::new("/home/me/configs");
//!     let settings = Settings::load(configs)?;
//!     let mut engine = SyncEngine::new(configs, Path::new("/home/me"), &settings)?;
//!     let files = engine.scan()?;
//!     let report = engine.sync(&files, false, &mut AlwaysYes)?;
//!     println!("synced {} of {} files", report.applied_count(), report.considered);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod exclude;
pub mod merge;
pub mod policy;
pub mod prompt;
pub mod settings;
pub mod state;
pub mod sync;

pub use error::{Error, Result};
pub use exclude::ExcludeRule;
pub use merge::MergeOutcome;
pub use policy::{Policy, PolicyAssignment};
pub use prompt::{AlwaysNo, AlwaysYes, Prompter};
pub use settings::{SETTINGS_FILE_NAME, Settings};
pub use state::{SyncRecord, SyncState};
pub use sync::{FileOutcome, FileReport, SyncCandidate, SyncEngine, SyncReport};
