//! Confirmation collaborator
//!
//! The engine asks before it creates or modifies a target unless `force` is
//! set. Interactive front-ends supply their own [`Prompter`].

use crate::Result;

/// Presents a yes/no question to an operator.
pub trait Prompter {
    /// Ask `message`; `Ok(true)` means the operator agreed.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Answers every question with yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysYes;

impl Prompter for AlwaysYes {
    fn confirm(&mut self, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Answers every question with no.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysNo;

impl Prompter for AlwaysNo {
    fn confirm(&mut self, _message: &str) -> Result<bool> {
        Ok(false)
    }
}

impl<F> Prompter for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self(message)
    }
}

/// Interpret a typed answer: `y` and `yes` (any case, surrounding whitespace ignored) agree.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
