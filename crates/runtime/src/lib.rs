//! Runtime orchestration around the deterministic combat core.
//!
//! This crate connects an encounter to the layers outside combat: it picks a
//! target from a location, awaits player commands from an action source,
//! dispatches kill and loot listeners once a fight is over, and hands the
//! loot back to the location.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the encounter driver
//! - [`api`] exposes the action source seam and the error type
//! - [`listeners`] provides the post-victory listener chain
//! - [`world`] defines the location contract
//! - [`config`] and [`logging`] bootstrap binaries
pub mod api;
pub mod config;
pub mod listeners;
pub mod logging;
pub mod session;
pub mod world;

pub use api::{
    ActionPrompt, ActionSource, LineActions, Result, RuntimeError, ScriptedActions, SpellOption,
};
pub use config::RuntimeConfig;
pub use listeners::{KillListener, ListenerRegistry, LootListener, TracingListener};
pub use logging::setup_logging;
pub use session::{CombatSession, EncounterReport};
pub use world::{InMemoryLocation, Location};
