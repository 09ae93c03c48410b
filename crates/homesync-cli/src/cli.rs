//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use homesync_core::Policy;

/// homesync - Synchronize configuration files into your home directory
#[derive(Parser, Debug)]
#[command(name = "homesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set default sync policy to append
    #[arg(long, conflicts_with = "overwrite")]
    pub append: bool,

    /// Set default sync policy to overwrite (the default)
    #[arg(long)]
    pub overwrite: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub force: bool,

    /// Do not sync, just show current sync states
    #[arg(long, alias = "show_state", conflicts_with = "clear_state")]
    pub show_state: bool,

    /// Do not sync, just clear all sync states
    #[arg(long, alias = "clear_state")]
    pub clear_state: bool,

    /// Sync into ./debug_home instead of the home directory
    #[arg(long)]
    pub debug: bool,

    /// Source configs directory [default: ~/configs]
    #[arg(long, env = "HOMESYNC_CONFIGS_DIR", value_name = "DIR")]
    pub configs_dir: Option<PathBuf>,

    /// Target directory [default: home directory]
    #[arg(long, env = "HOMESYNC_TARGET_DIR", value_name = "DIR", conflicts_with = "debug")]
    pub target_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default policy requested on the command line, if any
    pub fn policy_override(&self) -> Option<Policy> {
        if self.append {
            Some(Policy::Append)
        } else if self.overwrite {
            Some(Policy::Overwrite)
        } else {
            None
        }
    }
}
