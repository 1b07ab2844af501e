//! Status effect engine.
//!
//! Status effects are timed modifiers attached to a combatant. Each effect
//! carries a typed payload per kind and a `turns_left` counter that is
//! decremented once at the start of every owner turn.
//!
//! # Refresh policy
//!
//! At most one effect of each kind is tracked. Applying a kind that is
//! already present resets its `turns_left` to the new duration and keeps the
//! magnitude of the effect already in place.

use core::fmt;

use arrayvec::ArrayVec;
use strum::EnumDiscriminants;

use crate::config::CombatConfig;
use crate::state::ResourceMeter;

/// Kind of a status effect, with its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(StatusEffectTag), derive(Hash, strum::Display, strum::EnumIter))]
#[strum_discriminants(cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Damage at the start of every owner turn, ignoring defense.
    Poison { damage_per_turn: u32 },

    /// The owner skips its action.
    Stun,

    AttackBuff { amount: u32 },
    AttackDebuff { amount: u32 },
    DefenseBuff { amount: u32 },
    DefenseDebuff { amount: u32 },
}

impl StatusEffectKind {
    pub fn tag(&self) -> StatusEffectTag {
        StatusEffectTag::from(self)
    }

    /// Contribution of this effect to attack power.
    pub fn attack_modifier(&self) -> i32 {
        match *self {
            Self::AttackBuff { amount } => saturating_i32(amount),
            Self::AttackDebuff { amount } => -saturating_i32(amount),
            _ => 0,
        }
    }

    /// Contribution of this effect to defense.
    pub fn defense_modifier(&self) -> i32 {
        match *self {
            Self::DefenseBuff { amount } => saturating_i32(amount),
            Self::DefenseDebuff { amount } => -saturating_i32(amount),
            _ => 0,
        }
    }
}

fn saturating_i32(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}

impl StatusEffectTag {
    /// Human-readable name ("Attack Buff").
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Poison => "Poison",
            Self::Stun => "Stun",
            Self::AttackBuff => "Attack Buff",
            Self::AttackDebuff => "Attack Debuff",
            Self::DefenseBuff => "Defense Buff",
            Self::DefenseDebuff => "Defense Debuff",
        }
    }
}

/// Immutable definition of an effect an ability applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectTemplate {
    pub kind: StatusEffectKind,
    pub duration: u32,
}

impl StatusEffectTemplate {
    pub const fn new(kind: StatusEffectKind, duration: u32) -> Self {
        Self { kind, duration }
    }

    /// Turn count a fresh instance starts with. A zero duration still fires
    /// once.
    fn initial_turns(&self) -> u32 {
        self.duration.max(1)
    }
}

/// A tracked effect instance on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub turns_left: u32,
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.tag().label())?;
        match self.kind {
            StatusEffectKind::Poison { damage_per_turn } => {
                write!(f, " ({damage_per_turn} dmg/turn)")?
            }
            StatusEffectKind::AttackBuff { amount } | StatusEffectKind::DefenseBuff { amount } => {
                write!(f, " (+{amount})")?
            }
            StatusEffectKind::AttackDebuff { amount }
            | StatusEffectKind::DefenseDebuff { amount } => write!(f, " (-{amount})")?,
            StatusEffectKind::Stun => {}
        }
        write!(f, " [{} turns]", self.turns_left)
    }
}

/// Result of [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectApplication {
    Added,
    Refreshed,
    /// Every slot is taken; the effect was dropped.
    Rejected,
}

/// Something that happened while effects were processed at turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusTick {
    PoisonDamage { damage: u32 },
    Stunned,
    AttackSurge,
    DefenseBolstered,
    Expired(StatusEffectTag),
}

/// Outcome of one turn-start pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub stunned: bool,
    pub ticks: Vec<StatusTick>,
}

/// Active status effects on a combatant, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect, refreshing the duration of an existing one of the
    /// same kind instead of stacking.
    pub fn apply(&mut self, template: StatusEffectTemplate) -> EffectApplication {
        let tag = template.kind.tag();
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind.tag() == tag) {
            existing.turns_left = template.initial_turns();
            return EffectApplication::Refreshed;
        }

        let effect = StatusEffect {
            kind: template.kind,
            turns_left: template.initial_turns(),
        };
        match self.effects.try_push(effect) {
            Ok(()) => EffectApplication::Added,
            Err(_) => EffectApplication::Rejected,
        }
    }

    /// Runs turn-start processing against the owner's health.
    ///
    /// Effects are handled in application order. A poison tick that empties
    /// `health` still counts down its own effect, then processing stops.
    /// Expired effects are removed at the end of the pass.
    pub fn process_turn(&mut self, health: &mut ResourceMeter) -> StatusReport {
        let mut report = StatusReport::default();

        for effect in self.effects.iter_mut() {
            match effect.kind {
                StatusEffectKind::Poison { damage_per_turn } => {
                    let damage = health.drain(damage_per_turn);
                    report.ticks.push(StatusTick::PoisonDamage { damage });
                }
                StatusEffectKind::Stun => {
                    report.stunned = true;
                    report.ticks.push(StatusTick::Stunned);
                }
                StatusEffectKind::AttackBuff { .. } => report.ticks.push(StatusTick::AttackSurge),
                StatusEffectKind::DefenseBuff { .. } => {
                    report.ticks.push(StatusTick::DefenseBolstered)
                }
                StatusEffectKind::AttackDebuff { .. } | StatusEffectKind::DefenseDebuff { .. } => {}
            }

            effect.turns_left = effect.turns_left.saturating_sub(1);
            if effect.turns_left == 0 {
                report.ticks.push(StatusTick::Expired(effect.kind.tag()));
            }
            if health.is_empty() {
                break;
            }
        }

        self.effects.retain(|e| e.turns_left > 0);
        report
    }

    pub fn get(&self, tag: StatusEffectTag) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind.tag() == tag)
    }

    pub fn has(&self, tag: StatusEffectTag) -> bool {
        self.get(tag).is_some()
    }

    /// Net attack modifier of all active buffs and debuffs.
    pub fn attack_modifier(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| e.kind.attack_modifier())
            .fold(0, i32::saturating_add)
    }

    /// Net defense modifier of all active buffs and debuffs.
    pub fn defense_modifier(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| e.kind.defense_modifier())
            .fold(0, i32::saturating_add)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl fmt::Display for StatusEffects {
    /// `None` when empty, otherwise a comma-separated list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.effects.is_empty() {
            return f.write_str("None");
        }
        for (index, effect) in self.effects.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{effect}")?;
        }
        Ok(())
    }
}
