//! Combatant model shared by the player and monsters.
//!
//! [`Combatant`] holds the raw record (pools, base stats, effects, abilities).
//! [`Fighter`] layers the derived stats and the damage/heal contract on top,
//! letting `Player` add equipment bonuses while `Monster` uses the defaults.

use super::ability::SharedAbility;
use super::resources::ResourceMeter;
use super::status::{EffectApplication, StatusEffectTemplate, StatusEffects, StatusReport};

/// Mana every combatant starts with unless content says otherwise.
pub const DEFAULT_MANA: u32 = 20;

fn clamp_stat(total: i64) -> i32 {
    i32::try_from(total).unwrap_or(if total < 0 { i32::MIN } else { i32::MAX })
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    /// Only ever raised, by skill level-ups.
    pub base_attack: u32,
    /// Only ever raised, by skill level-ups.
    pub base_defense: u32,
    pub status: StatusEffects,
    pub abilities: Vec<SharedAbility>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_health: u32, base_attack: u32, base_defense: u32) -> Self {
        Self {
            name: name.into(),
            health: ResourceMeter::full(max_health),
            mana: ResourceMeter::full(DEFAULT_MANA),
            base_attack,
            base_defense,
            status: StatusEffects::empty(),
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mana(mut self, max_mana: u32) -> Self {
        self.mana = ResourceMeter::full(max_mana);
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = SharedAbility>) -> Self {
        self.abilities.extend(abilities);
        self
    }

    pub fn knows_ability(&self, name: &str) -> bool {
        self.abilities.iter().any(|a| a.name == name)
    }
}

/// Derived-stat and damage contract of anything that fights.
pub trait Fighter {
    fn combatant(&self) -> &Combatant;
    fn combatant_mut(&mut self) -> &mut Combatant;

    /// Flat attack bonus from gear.
    fn gear_attack_bonus(&self) -> u32 {
        0
    }

    /// Flat defense bonus from gear.
    fn gear_defense_bonus(&self) -> u32 {
        0
    }

    fn name(&self) -> &str {
        &self.combatant().name
    }

    /// `base_attack + buffs - debuffs + gear`. May be negative.
    fn attack_power(&self) -> i32 {
        let c = self.combatant();
        clamp_stat(
            i64::from(c.base_attack)
                + i64::from(c.status.attack_modifier())
                + i64::from(self.gear_attack_bonus()),
        )
    }

    /// `base_defense + buffs - debuffs + gear`. May be negative.
    fn defense(&self) -> i32 {
        let c = self.combatant();
        clamp_stat(
            i64::from(c.base_defense)
                + i64::from(c.status.defense_modifier())
                + i64::from(self.gear_defense_bonus()),
        )
    }

    fn is_alive(&self) -> bool {
        !self.combatant().health.is_empty()
    }

    /// Applies damage and returns the amount taken.
    ///
    /// With `bypass_defense` the amount is taken unmodified. Otherwise
    /// `max(1, amount - defense)` is taken, so a hit always lands.
    fn take_damage(&mut self, amount: u32, bypass_defense: bool) -> u32 {
        let taken = if bypass_defense {
            amount
        } else {
            let reduced = (i64::from(amount) - i64::from(self.defense())).max(1);
            u32::try_from(reduced).unwrap_or(u32::MAX)
        };
        self.combatant_mut().health.drain(taken);
        taken
    }

    /// Returns the amount actually healed.
    fn heal(&mut self, amount: u32) -> u32 {
        self.combatant_mut().health.restore(amount)
    }

    /// Returns the amount actually restored.
    fn restore_mana(&mut self, amount: u32) -> u32 {
        self.combatant_mut().mana.restore(amount)
    }

    fn apply_effect(&mut self, template: StatusEffectTemplate) -> EffectApplication {
        self.combatant_mut().status.apply(template)
    }

    /// Turn-start status processing. Must run before every turn of this
    /// fighter, the first one included.
    fn process_turn_effects(&mut self) -> StatusReport {
        let Combatant { health, status, .. } = self.combatant_mut();
        status.process_turn(health)
    }
}

impl Fighter for Combatant {
    fn combatant(&self) -> &Combatant {
        self
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        self
    }
}
