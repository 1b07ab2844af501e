//! Ability definitions.
//!
//! Abilities are immutable and shared (`Arc<Ability>`) between every
//! combatant that knows them. Using one mutates only the caster's mana and the
//! receiver's health and effects, never the definition.

use std::sync::Arc;

use super::status::StatusEffectTemplate;

/// Direct effect of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Damage to the opponent, mitigated by its defense.
    Damage { amount: u32 },
    /// Healing for the caster.
    Heal { amount: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<AbilityEffect>,
    /// Applied to the opponent on use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effect: Option<StatusEffectTemplate>,
}

impl Ability {
    pub fn new(name: impl Into<String>, mana_cost: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            mana_cost,
            effect: None,
            status_effect: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status_effect: StatusEffectTemplate) -> Self {
        self.status_effect = Some(status_effect);
        self
    }

    pub fn shared(self) -> SharedAbility {
        Arc::new(self)
    }

    /// Starting spell every new player knows.
    pub fn firebolt() -> Self {
        Self::new("Firebolt", 5)
            .with_description("Hurls a small bolt of fire at the enemy.")
            .with_effect(AbilityEffect::Damage { amount: 20 })
    }
}

pub type SharedAbility = Arc<Ability>;
