//! Core library for the stackops interactive hosting console.
//!
//! The crate is split into a small reusable workflow engine and a set of thin
//! collaborator modules that the engine drives:
//!
//! - **Workflow engine** (`ui`): the menu navigation loop, the three-phase
//!   prompt protocol, and the `Console` capability trait that both are
//!   parameterized over. This is the only part of the crate with real
//!   control-flow design; it contains every interaction boundary and every
//!   error-containment point.
//! - **Collaborators** (`website`, `ssl`, `php`, `webserver`, `editor`): the
//!   actual administrative operations. The engine only ever sees them as
//!   actions or prompt hooks that succeed, fail, or are cancelled.
//! - **Configuration** (`config`): KEY=VALUE environment file loading with
//!   process-environment overrides.
//!
//! Everything here is synchronous and single-threaded: the console serves
//! exactly one operator, and every suspension point is a blocking wait for
//! one line of input.

pub mod config;
pub mod editor;
pub mod errors;
pub mod php;
pub mod ssl;
pub mod ui;
pub mod webserver;
pub mod website;

pub use config::Env;
pub use errors::OpsError;
pub use ui::console::{Console, TermConsole};
pub use ui::menu::{Action, Menu, MenuItem, BACK_ID};
pub use ui::prompt::{run_prompt, Prompt};

#[cfg(test)]
pub mod test_utils;
