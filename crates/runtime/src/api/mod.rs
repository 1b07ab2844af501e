//! Public runtime surface: the action source seam and the error type.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionPrompt, ActionSource, LineActions, ScriptedActions, SpellOption};
