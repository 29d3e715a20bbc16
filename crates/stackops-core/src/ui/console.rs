//! Console capability trait and its terminal implementation.
//!
//! Every blocking wait in the engine goes through this trait, and every wait
//! returns a tri-state `Result<Option<T>, OpsError>`:
//!
//! - `Ok(Some(value))`: the user answered.
//! - `Ok(None)`: the user cancelled the wait (Esc).
//! - `Err(OpsError::Interrupted)`: the user forced an interrupt (Ctrl-C or
//!   end-of-input); callers treat this the same as cancellation.
//! - any other `Err`: a real terminal failure.
//!
//! The trait is injected into `Menu::display` and every prompt hook so that
//! tests can substitute a scripted console and assert on the exact sequence
//! of interactions.

use crate::errors::OpsError;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Present an ordered list of labels and block for exactly one choice.
    fn select(&mut self, title: &str, choices: &[String]) -> Result<Option<String>, OpsError>;

    /// Block for a yes/no answer.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, OpsError>;

    /// Block for one line of free text.
    fn input(&mut self, prompt: &str) -> Result<Option<String>, OpsError>;

    /// Fire-and-forget line output.
    fn line(&mut self, text: &str);

    /// Block until the user acknowledges with Enter, so action output stays
    /// visible before the next menu render.
    fn pause(&mut self) -> Result<(), OpsError>;
}

/// Production console backed by dialoguer prompts on the controlling terminal.
pub struct TermConsole {
    theme: ColorfulTheme,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn select(&mut self, title: &str, choices: &[String]) -> Result<Option<String>, OpsError> {
        let chosen = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(choices)
            .default(0)
            .interact_opt()?;
        Ok(chosen.map(|idx| choices[idx].clone()))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, OpsError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }

    fn input(&mut self, prompt: &str) -> Result<Option<String>, OpsError> {
        // dialoguer's Input has no interact_opt; Ctrl-C surfaces as an
        // interrupted I/O error, which OpsError already maps to Interrupted.
        let text: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn pause(&mut self) -> Result<(), OpsError> {
        print!("\n⏎ Press Enter to continue...");
        io::stdout().flush()?;
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            // End-of-input behaves like a forced interrupt.
            return Err(OpsError::Interrupted);
        }
        Ok(())
    }
}
