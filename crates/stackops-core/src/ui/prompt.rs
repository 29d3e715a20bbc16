//! Three-phase prompt protocol for guarded interactive operations.
//!
//! Every interactive workflow in the console follows the same discipline:
//! collect inputs, process them, show the result. Implementors supply the
//! three hooks; the fixed-order orchestration lives in [`run_prompt`], a free
//! function rather than a trait method, so no implementor can reorder phases
//! or weaken the cancellation and error handling.
//!
//! The contract enforced here:
//!
//! - inputs are never re-requested once processing has started;
//! - `show_results` runs exactly once, and only when processing produced a
//!   non-empty result;
//! - cancellation (at any phase) prints a uniform notice and yields `None`;
//! - any processing failure is logged, shown to the user, and yields `None`;
//!   nothing ever escapes `run_prompt`. Partial side effects are the
//!   collaborator's problem; callers must treat `None` as "nothing to show",
//!   not "nothing happened".

use crate::errors::OpsError;
use crate::ui::console::Console;

pub trait Prompt {
    type Input;
    type Output;

    /// Gather raw user input. `Ok(None)` signals user cancellation.
    fn collect_inputs(&mut self, console: &mut dyn Console)
        -> Result<Option<Self::Input>, OpsError>;

    /// Run the business step on the collected inputs. `Ok(None)` means the
    /// operation completed with nothing to display (e.g. a declined
    /// confirmation mapped to no-op).
    fn process(
        &mut self,
        console: &mut dyn Console,
        inputs: Self::Input,
    ) -> Result<Option<Self::Output>, OpsError>;

    /// Render the stored result. Takes the result by shared reference, so it
    /// cannot be mutated during display.
    fn show_results(&self, console: &mut dyn Console, result: &Self::Output);
}

/// Execute a prompt's three phases in fixed order and return the final
/// result, or `None` on cancellation or failure.
pub fn run_prompt<P: Prompt>(prompt: &mut P, console: &mut dyn Console) -> Option<P::Output> {
    let inputs = match prompt.collect_inputs(console) {
        Ok(Some(inputs)) => inputs,
        Ok(None) => {
            log::debug!("prompt cancelled while collecting inputs");
            console.line("Operation cancelled.");
            return None;
        }
        Err(OpsError::Interrupted) => {
            log::debug!("prompt interrupted while collecting inputs");
            console.line("\nOperation cancelled.");
            return None;
        }
        Err(err) => {
            log::error!("prompt failed while collecting inputs: {}", err);
            console.line(&format!("❌ {}", err));
            return None;
        }
    };

    let result = match prompt.process(console, inputs) {
        Ok(result) => result,
        Err(OpsError::Interrupted) => {
            log::debug!("prompt interrupted during processing");
            console.line("\nOperation cancelled.");
            return None;
        }
        Err(err) => {
            log::error!("prompt processing failed: {}", err);
            console.line(&format!("❌ {}", err));
            return None;
        }
    };

    if let Some(value) = &result {
        prompt.show_results(console, value);
    }
    result
}
