//! Monsters and the templates they are spawned from.

use super::ability::SharedAbility;
use super::combatant::{Combatant, DEFAULT_MANA, Fighter};
use super::item::Item;

/// Static description of a monster kind.
///
/// Abilities and loot are referenced by catalog id; content resolves them
/// when spawning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_mana"))]
    pub mana: u32,
    pub xp_yield: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<String>,
    /// Defeating this monster completes the campaign.
    #[cfg_attr(feature = "serde", serde(default))]
    pub final_boss: bool,
}

#[cfg(feature = "serde")]
fn default_mana() -> u32 {
    DEFAULT_MANA
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub combatant: Combatant,
    pub description: String,
    /// Combat experience granted to the player on defeat.
    pub xp_yield: u32,
    /// Dropped in full on defeat.
    pub loot: Vec<Item>,
    pub final_boss: bool,
}

impl Monster {
    pub fn new(name: impl Into<String>, max_health: u32, attack: u32, defense: u32, xp_yield: u32) -> Self {
        Self {
            combatant: Combatant::new(name, max_health, attack, defense).with_mana(DEFAULT_MANA),
            description: String::new(),
            xp_yield,
            loot: Vec::new(),
            final_boss: false,
        }
    }

    /// Builds a monster from a template whose references are already
    /// resolved.
    pub fn from_template(
        template: &MonsterTemplate,
        abilities: impl IntoIterator<Item = SharedAbility>,
        loot: impl IntoIterator<Item = Item>,
    ) -> Self {
        let combatant = Combatant::new(
            template.name.clone(),
            template.health,
            template.attack,
            template.defense,
        )
        .with_mana(template.mana)
        .with_abilities(abilities);

        Self {
            combatant,
            description: template.description.clone(),
            xp_yield: template.xp_yield,
            loot: loot.into_iter().collect(),
            final_boss: template.final_boss,
        }
    }

    #[must_use]
    pub fn with_loot(mut self, loot: impl IntoIterator<Item = Item>) -> Self {
        self.loot.extend(loot);
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = SharedAbility>) -> Self {
        self.combatant.abilities.extend(abilities);
        self
    }

    /// Takes the whole loot table. A second call yields nothing.
    pub fn drop_loot(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.loot)
    }

    /// Abilities the monster can currently pay for, in known order.
    pub fn affordable_abilities(&self) -> Vec<SharedAbility> {
        let mana = self.combatant.mana.current();
        self.combatant
            .abilities
            .iter()
            .filter(|a| a.mana_cost <= mana)
            .cloned()
            .collect()
    }
}

impl Fighter for Monster {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }
}
