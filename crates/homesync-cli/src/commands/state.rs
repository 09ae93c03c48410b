//! State inspection commands

use colored::Colorize;
use homesync_core::SyncEngine;
use homesync_core::state::render_pretty;

use crate::error::Result;

/// Print every record in the sync state.
pub fn run_show_state(engine: &SyncEngine) -> Result<()> {
    let state = engine.state();
    if state.is_empty() {
        println!("There is no sync state available.");
        return Ok(());
    }

    println!("{}", "Current Sync States:".bold());
    for (path, record) in state.iter() {
        println!("{}:", path.cyan());
        println!("{}", render_pretty(record)?);
    }
    Ok(())
}

/// Clear the sync state and persist the empty result.
pub fn run_clear_state(engine: &mut SyncEngine) -> Result<()> {
    if engine.clear_state()? {
        println!("{} All sync states have been cleared.", "OK".green().bold());
    } else {
        println!("There is no sync state to clear.");
    }
    Ok(())
}
