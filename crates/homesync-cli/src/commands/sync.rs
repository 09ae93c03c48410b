//! Sync command implementation

use colored::Colorize;
use homesync_core::state::render_pretty;
use homesync_core::{FileOutcome, Prompter, SyncEngine, SyncReport};

use crate::error::{CliError, Result};

/// Scan the configs root and sync every file that needs it.
///
/// Any failure during the batch is reported as [`CliError::SyncAborted`];
/// by then the engine has already removed its staging files.
pub fn run_sync(engine: &mut SyncEngine, force: bool, prompter: &mut dyn Prompter) -> Result<()> {
    let files = engine.scan()?;

    println!(
        "{} Found {} files to consider for syncing:",
        "=>".blue().bold(),
        files.len()
    );
    for file in &files {
        println!("   {} {}", "-".dimmed(), file.display());
    }

    let report = engine
        .sync(&files, force, prompter)
        .map_err(|source| CliError::SyncAborted { source })?;

    print_report(&report)?;
    Ok(())
}

fn print_report(report: &SyncReport) -> Result<()> {
    for file in &report.files {
        let target = file.target.display().to_string();
        match file.outcome {
            FileOutcome::Synced => println!(
                "   {} {} ({})",
                "+".green(),
                target.cyan(),
                file.policy.to_string().dimmed()
            ),
            FileOutcome::Unchanged => println!(
                "   {} {} (already up to date)",
                "=".blue(),
                target.cyan()
            ),
            FileOutcome::Skipped => {
                println!("   {} {} (skipped)", "-".yellow(), target.cyan())
            }
        }
    }

    println!(
        "{} Successfully finished syncing: {} applied, {} skipped.",
        "OK".green().bold(),
        report.applied_count(),
        report.skipped_count()
    );
    println!("Updated Sync States: {}", render_pretty(&report.updated)?);
    Ok(())
}
