//! Command implementations for homesync-cli

pub mod state;
pub mod sync;

pub use state::{run_clear_state, run_show_state};
pub use sync::run_sync;
