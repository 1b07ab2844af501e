//! Combat resolver.
//!
//! - [`damage`]: pure mitigation and flee math
//! - [`Encounter`]: the round-by-round state machine that composes the
//!   status engine, skill progression and the enemy decision model
//! - [`CombatEvent`]: narrated, structured record of everything a round did

pub mod damage;

mod action;
mod encounter;
mod event;
mod outcome;

pub use action::{ActionParseError, PlayerAction};
pub use damage::{Guard, Mitigation};
pub use encounter::{Encounter, Phase};
pub use event::CombatEvent;
pub use outcome::{
    CombatantSnapshot, EncounterError, EncounterStatus, Resolution, Rewards, RoundOutcome,
};
