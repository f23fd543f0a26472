//! Confirmation prompts
//!
//! Destructive bulk operations ask before committing. The [`Prompt`] trait
//! lets handlers be driven without a terminal.

use std::io::{self, BufRead, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Asks the user a yes/no question
pub trait Prompt {
    fn confirm(&mut self, message: &str) -> ExpenseResult<bool>;
}

/// Reads the answer from stdin
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> ExpenseResult<bool> {
        print!("{} (yes/no) [no]: ", message);
        io::stdout().flush().map_err(|e| ExpenseError::Io(e.to_string()))?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| ExpenseError::Io(e.to_string()))?;

        Ok(is_yes(&input))
    }
}

/// Answers yes without asking, for `--yes`
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&mut self, _message: &str) -> ExpenseResult<bool> {
        Ok(true)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
