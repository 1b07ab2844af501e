//! Post-victory listener system.
//!
//! Once an encounter has returned control, the session tells interested
//! systems what happened:
//!
//! - [`KillListener`]s run in priority order (lower first); the first that
//!   reports the kill handled stops the chain
//! - [`LootListener`]s all observe every non-empty drop
//!
//! Listeners never run while an encounter is resolving, so they can't see
//! or touch a half-finished round.

mod registry;
mod tracing_listener;

pub use registry::ListenerRegistry;
pub use tracing_listener::TracingListener;

use combat_core::{Item, Monster, Player};

/// Reacts to a defeated monster.
pub trait KillListener: Send + Sync {
    /// Returns a human-readable name for this listener (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns `true` when the kill is fully handled; later listeners are
    /// skipped.
    fn on_kill(&self, player: &Player, monster: &Monster) -> bool;
}

/// Observes loot as it leaves a defeated monster.
pub trait LootListener: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_loot(&self, player: &Player, monster: &Monster, items: &[Item]);
}
