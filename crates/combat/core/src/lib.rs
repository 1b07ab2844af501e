//! Deterministic combat and progression rules.
//!
//! `combat-core` defines the combatant model, the status effect engine, skill
//! progression, the enemy decision model and the encounter state machine that
//! composes them. It performs no I/O: randomness comes from an injected
//! [`RngOracle`] and every round returns its narration as [`CombatEvent`]s.
pub mod ai;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod skills;
pub mod state;

pub use ai::{
    Decision, DecisionContext, EnemyDecisionModel, PlayerActionKind, Stance, StanceWeights,
};
pub use combat::{
    ActionParseError, CombatEvent, CombatantSnapshot, Encounter, EncounterError,
    EncounterStatus, Phase, PlayerAction, Resolution, Rewards, RoundOutcome,
};
pub use config::CombatConfig;
pub use env::{PcgRng, RngOracle, RollContext, ScriptedRng, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use skills::{LevelBonus, LevelUp, Skill, SkillBook, SkillError, SkillGain, SkillKind};
pub use state::{
    Ability, AbilityEffect, Combatant, DEFAULT_MANA, EffectApplication, EquipError, Equipment,
    Fighter, Item, ItemKind, Monster, MonsterTemplate, Player, ResourceMeter, Restores,
    SharedAbility, StatusEffect, StatusEffectKind, StatusEffectTag, StatusEffectTemplate,
    StatusEffects, StatusReport, StatusTick,
};
