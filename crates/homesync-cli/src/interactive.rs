//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based input.

use dialoguer::Input;
use homesync_core::Prompter;
use homesync_core::prompt::is_affirmative;

/// Asks the operator on the terminal before each create or modify.
///
/// Only `y` or `yes` agree; anything else, including an empty answer, skips the file.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> homesync_core::Result<bool> {
        let answer = Input::<String>::new()
            .with_prompt(prompt_text(message))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| homesync_core::Error::prompt(e.to_string()))?;

        let agreed = is_affirmative(&answer);
        if !agreed {
            println!("Skipping.");
        }
        Ok(agreed)
    }
}

/// dialoguer appends its own `: ` after the prompt.
fn prompt_text(message: &str) -> &str {
    message.trim_end().trim_end_matches(':')
}
