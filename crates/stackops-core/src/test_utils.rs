//! Test doubles for the workflow engine.
//!
//! `ScriptedConsole` replaces the terminal with queued replies and captured
//! output, which lets tests drive whole menu sessions deterministically and
//! assert on the exact interaction sequence.

use crate::errors::OpsError;
use crate::ui::console::Console;
use crate::ui::menu::Action;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One scripted reply to a `select` call.
pub enum SelectReply {
    Choice(String),
    Cancelled,
    Interrupted,
}

#[derive(Default)]
pub struct ScriptedConsole {
    selects: VecDeque<SelectReply>,
    confirms: VecDeque<Option<bool>>,
    inputs: VecDeque<Option<String>>,
    pause_replies: VecDeque<Result<(), OpsError>>,
    lines: Vec<String>,
    pauses: usize,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_select(&mut self, reply: SelectReply) {
        self.selects.push_back(reply);
    }

    pub fn push_confirm(&mut self, reply: Option<bool>) {
        self.confirms.push_back(reply);
    }

    pub fn push_input(&mut self, reply: Option<&str>) {
        self.inputs.push_back(reply.map(|s| s.to_string()));
    }

    pub fn interrupt_next_pause(&mut self) {
        self.pause_replies.push_back(Err(OpsError::Interrupted));
    }

    /// Whether any output line contains the given fragment.
    pub fn printed(&self, fragment: &str) -> bool {
        self.lines.iter().any(|line| line.contains(fragment))
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Console for ScriptedConsole {
    fn select(&mut self, _title: &str, _choices: &[String]) -> Result<Option<String>, OpsError> {
        // An exhausted script behaves like a cancel, so a forgotten reply
        // terminates the loop instead of hanging the test.
        match self.selects.pop_front() {
            Some(SelectReply::Choice(choice)) => Ok(Some(choice)),
            Some(SelectReply::Cancelled) | None => Ok(None),
            Some(SelectReply::Interrupted) => Err(OpsError::Interrupted),
        }
    }

    fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<Option<bool>, OpsError> {
        Ok(self.confirms.pop_front().flatten())
    }

    fn input(&mut self, _prompt: &str) -> Result<Option<String>, OpsError> {
        Ok(self.inputs.pop_front().flatten())
    }

    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn pause(&mut self) -> Result<(), OpsError> {
        self.pauses += 1;
        self.pause_replies.pop_front().unwrap_or(Ok(()))
    }
}

/// Action that bumps a shared counter on every invocation.
pub fn counting_action(counter: &Rc<Cell<usize>>) -> impl Action {
    let counter = Rc::clone(counter);
    move |_: &mut dyn Console| -> Result<(), OpsError> {
        counter.set(counter.get() + 1);
        Ok(())
    }
}

/// Action that always fails with the given message.
pub fn failing_action(message: &str) -> impl Action {
    let message = message.to_string();
    move |_: &mut dyn Console| -> Result<(), OpsError> {
        Err(OpsError::IoError(message.clone()))
    }
}
