//! Combatant records: pools, effects, abilities, gear and skills.
//!
//! The encounter resolver is the only code that mutates a [`Player`] or a
//! [`Monster`] while a fight is running.

mod ability;
mod combatant;
mod equipment;
mod item;
mod monster;
mod player;
mod resources;
mod status;

pub use ability::{Ability, AbilityEffect, SharedAbility};
pub use combatant::{Combatant, DEFAULT_MANA, Fighter};
pub use equipment::{EquipError, Equipment};
pub use item::{Item, ItemKind, Restores};
pub use monster::{Monster, MonsterTemplate};
pub use player::Player;
pub use resources::ResourceMeter;
pub use status::{
    EffectApplication, StatusEffect, StatusEffectKind, StatusEffectTag, StatusEffectTemplate,
    StatusEffects, StatusReport, StatusTick,
};
