//! homesync CLI
//!
//! Synchronizes a directory of configuration files into the home directory,
//! tracking per-file state between runs.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;
use homesync_core::{AlwaysYes, Prompter, Settings, SyncEngine};

use cli::Cli;
use context::RunContext;
use error::Result;
use interactive::TerminalPrompter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(?cli, "Parsed arguments");

    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir();
    let ctx = RunContext::resolve(&cli, &cwd, home.as_deref())?;

    let mut settings = Settings::load(&ctx.configs_root)?;
    if let Some(policy) = cli.policy_override() {
        settings.default_policy = policy;
    }

    println!("Target directory: {}", ctx.target_root.display());
    println!("Source directory: {}", ctx.configs_root.display());
    println!("State file: {}", ctx.state_path(&settings).display());

    ctx.validate(&cwd)?;

    let mut engine = SyncEngine::new(&ctx.configs_root, &ctx.target_root, &settings)?;

    if cli.show_state {
        return commands::run_show_state(&engine);
    }
    if cli.clear_state {
        return commands::run_clear_state(&mut engine);
    }

    let mut prompter: Box<dyn Prompter> = if cli.force {
        Box::new(AlwaysYes)
    } else {
        Box::new(TerminalPrompter)
    };
    commands::run_sync(&mut engine, cli.force, prompter.as_mut())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_policy_override_round_trip() {
        let cli = Cli::try_parse_from(["homesync", "--overwrite", "--force"]).unwrap();
        let mut settings = Settings::default();
        if let Some(policy) = cli.policy_override() {
            settings.default_policy = policy;
        }
        assert_eq!(settings.default_policy, homesync_core::Policy::Overwrite);
        assert!(cli.force);
    }
}
