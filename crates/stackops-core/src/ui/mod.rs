//! Interactive workflow engine: console abstraction, menu loop, and the
//! three-phase prompt protocol.

pub mod console;
pub mod menu;
pub mod prompt;
