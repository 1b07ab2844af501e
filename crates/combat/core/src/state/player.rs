//! The player character.

use std::collections::BTreeSet;

use tracing::debug;

use super::ability::{Ability, SharedAbility};
use super::combatant::{Combatant, Fighter};
use super::equipment::{EquipError, Equipment};
use super::item::Item;
use crate::skills::{LevelBonus, LevelUp, SkillBook, SkillError, SkillGain, SkillKind};

/// Health gained per Defense level.
const DEFENSE_HEALTH_PER_LEVEL: u32 = 10;
/// Mana gained per Magic level.
const MAGIC_MANA_PER_LEVEL: u32 = 10;
/// Wordbinding grants a slot every this many levels.
const WORDBINDING_SLOT_INTERVAL: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub combatant: Combatant,
    pub skills: SkillBook,
    pub equipment: Equipment,
    /// Power-words the player may bind at once.
    pub max_words_to_bind: u32,
    /// Skills that gained experience since the last player turn start.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    skills_affected: BTreeSet<SkillKind>,
}

impl Player {
    pub const DEFAULT_HEALTH: u32 = 100;
    pub const DEFAULT_ATTACK: u32 = 10;
    pub const DEFAULT_DEFENSE: u32 = 5;
    pub const DEFAULT_WORD_SLOTS: u32 = 2;

    /// A fresh character with default stats who knows Firebolt.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_stats(
            name,
            Self::DEFAULT_HEALTH,
            Self::DEFAULT_ATTACK,
            Self::DEFAULT_DEFENSE,
        )
        .with_ability(Ability::firebolt().shared())
    }

    /// A character with the given stats and no abilities.
    pub fn with_stats(
        name: impl Into<String>,
        max_health: u32,
        base_attack: u32,
        base_defense: u32,
    ) -> Self {
        Self {
            combatant: Combatant::new(name, max_health, base_attack, base_defense),
            skills: SkillBook::new(),
            equipment: Equipment::default(),
            max_words_to_bind: Self::DEFAULT_WORD_SLOTS,
            skills_affected: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: SharedAbility) -> Self {
        self.learn_ability(ability);
        self
    }

    /// Learns an ability unless one with the same name is already known.
    ///
    /// Returns `false` for duplicates.
    pub fn learn_ability(&mut self, ability: SharedAbility) -> bool {
        if self.combatant.knows_ability(&ability.name) {
            return false;
        }
        self.combatant.abilities.push(ability);
        true
    }

    /// Equips a weapon or armor, returning what it replaced.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, EquipError> {
        self.equipment.equip(item)
    }

    pub fn skill_level(&self, kind: SkillKind) -> u32 {
        self.skills.level(kind)
    }

    /// Adds experience to a skill, applying the bonus of every level crossed.
    pub fn add_skill_xp(&mut self, kind: SkillKind, amount: i64) -> SkillGain {
        if amount <= 0 {
            return SkillGain::default();
        }
        let reached = self.skills.get_mut(kind).add_xp(amount);
        self.skills_affected.insert(kind);

        let level_ups = reached
            .into_iter()
            .map(|level| LevelUp {
                skill: kind,
                level,
                bonus: self.apply_level_bonus(kind, level),
            })
            .collect();

        SkillGain {
            amount: amount as u64,
            level_ups,
        }
    }

    /// Same as [`Player::add_skill_xp`] for a skill named at runtime.
    pub fn add_skill_xp_by_name(&mut self, name: &str, amount: i64) -> Result<SkillGain, SkillError> {
        let kind = name.parse::<SkillKind>().map_err(|_| SkillError::UnknownSkill {
            name: name.to_string(),
        })?;
        Ok(self.add_skill_xp(kind, amount))
    }

    fn apply_level_bonus(&mut self, kind: SkillKind, level: u32) -> LevelBonus {
        let c = &mut self.combatant;
        let bonus = match kind {
            SkillKind::Attack => {
                c.base_attack += 1;
                LevelBonus::BaseAttack {
                    base_attack: c.base_attack,
                }
            }
            SkillKind::Defense => {
                c.base_defense += 1;
                c.health.grow(DEFENSE_HEALTH_PER_LEVEL);
                c.health.refill();
                LevelBonus::Fortitude {
                    base_defense: c.base_defense,
                    max_health: c.health.maximum(),
                }
            }
            SkillKind::Magic => {
                c.mana.grow(MAGIC_MANA_PER_LEVEL);
                c.mana.refill();
                LevelBonus::ManaPool {
                    max_mana: c.mana.maximum(),
                }
            }
            SkillKind::Wordbinding if level % WORDBINDING_SLOT_INTERVAL == 0 => {
                self.max_words_to_bind += 1;
                LevelBonus::WordSlots {
                    max_words_to_bind: self.max_words_to_bind,
                }
            }
            _ => LevelBonus::None,
        };
        debug!(skill = %kind, level, ?bonus, "skill level up");
        bonus
    }

    /// Skills that gained experience since the last call to
    /// [`Player::clear_affected_skills`].
    pub fn skills_affected(&self) -> &BTreeSet<SkillKind> {
        &self.skills_affected
    }

    pub fn clear_affected_skills(&mut self) {
        self.skills_affected.clear();
    }
}

impl Fighter for Player {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn gear_attack_bonus(&self) -> u32 {
        self.equipment.attack_bonus()
    }

    fn gear_defense_bonus(&self) -> u32 {
        self.equipment.defense_bonus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::{Skill, total_xp_for_level};

    #[test]
    fn new_player_has_defaults_and_firebolt() {
        let player = Player::new("Hero");
        assert_eq!(player.combatant.health.maximum(), 100);
        assert_eq!(player.combatant.mana.maximum(), 20);
        assert_eq!(player.attack_power(), 10);
        assert_eq!(player.defense(), 5);
        assert_eq!(player.max_words_to_bind, 2);
        assert!(player.combatant.knows_ability("Firebolt"));
    }

    #[test]
    fn learning_a_known_ability_is_rejected() {
        let mut player = Player::new("Hero");
        assert!(!player.learn_ability(Ability::firebolt().shared()));
        assert_eq!(player.combatant.abilities.len(), 1);
    }

    #[test]
    fn gear_feeds_derived_stats() {
        let mut player = Player::new("Hero");
        player.equip(Item::weapon("Iron Sword", 4)).unwrap();
        player.equip(Item::armor("Leather Armor", 2)).unwrap();
        assert_eq!(player.attack_power(), 14);
        assert_eq!(player.defense(), 7);
    }

    #[test]
    fn defense_level_grows_health_and_heals() {
        let mut player = Player::new("Hero");
        player.take_damage(60, true);
        let gain = player.add_skill_xp(SkillKind::Defense, 83);

        assert_eq!(gain.level_ups.len(), 1);
        assert_eq!(player.combatant.base_defense, 6);
        assert_eq!(player.combatant.health.maximum(), 110);
        assert!(player.combatant.health.is_full());
    }

    #[test]
    fn magic_level_grows_and_refills_mana() {
        let mut player = Player::new("Hero");
        player.combatant.mana.drain(15);
        player.add_skill_xp(SkillKind::Magic, 90);
        assert_eq!(player.combatant.mana.current(), 30);
        assert_eq!(player.combatant.mana.maximum(), 30);
    }

    #[test]
    fn wordbinding_adds_a_slot_every_fifth_level() {
        let mut player = Player::new("Hero");
        player.skills.set(Skill::at_level(SkillKind::Wordbinding, 4));
        let needed = total_xp_for_level(6) - total_xp_for_level(4);
        let gain = player.add_skill_xp(SkillKind::Wordbinding, needed as i64);

        assert_eq!(player.skill_level(SkillKind::Wordbinding), 6);
        assert_eq!(player.max_words_to_bind, 3);
        assert_eq!(gain.level_ups[1].bonus, LevelBonus::None);
    }

    #[test]
    fn two_level_attack_grant_applies_both_bonuses() {
        let mut player = Player::new("Hero");
        let first = total_xp_for_level(2);
        let second = total_xp_for_level(3);
        player.add_skill_xp(SkillKind::Attack, first as i64 - 1);
        assert_eq!(player.combatant.base_attack, 10);

        player.add_skill_xp(SkillKind::Attack, 100);

        let skill = player.skills.get(SkillKind::Attack);
        assert_eq!(skill.level(), 3);
        assert_eq!(player.combatant.base_attack, 12);
        assert_eq!(skill.xp_into_level(), 100 - 1 - (second - first));
    }

    #[test]
    fn maximal_grant_caps_the_level_and_its_bonuses() {
        let mut player = Player::new("Hero");
        let gain = player.add_skill_xp(SkillKind::Attack, i64::MAX);

        assert_eq!(gain.level_ups.len(), (Skill::MAX_LEVEL - 1) as usize);
        assert_eq!(player.skill_level(SkillKind::Attack), Skill::MAX_LEVEL);
        assert_eq!(player.combatant.base_attack, 10 + Skill::MAX_LEVEL - 1);
    }

    #[test]
    fn unknown_skill_name_is_an_error() {
        let mut player = Player::new("Hero");
        let err = player.add_skill_xp_by_name("Combat", 10).unwrap_err();
        assert_eq!(err, SkillError::UnknownSkill { name: "Combat".into() });
        assert!(player.add_skill_xp_by_name("hunting", 10).is_ok());
        assert!(player.skills_affected().contains(&SkillKind::Hunting));
    }
}
