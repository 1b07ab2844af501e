//! Default content compiled into the binary.
//!
//! These are the same files a data directory holds, so a runtime without one
//! still fights the full roster.

use combat_core::{Ability, CombatConfig, Item, MonsterTemplate};

use crate::loaders::{
    AbilityLoader, Bestiary, ConfigLoader, ItemLoader, LoadResult, MonsterLoader,
};

const ABILITIES_RON: &str = include_str!("../../data/abilities.ron");
const ITEMS_RON: &str = include_str!("../../data/items.ron");
const MONSTERS_RON: &str = include_str!("../../data/monsters.ron");
const COMBAT_TOML: &str = include_str!("../../data/combat.toml");

pub fn abilities() -> LoadResult<Vec<Ability>> {
    AbilityLoader::parse(ABILITIES_RON)
}

pub fn items() -> LoadResult<Vec<Item>> {
    ItemLoader::parse(ITEMS_RON)
}

pub fn monsters() -> LoadResult<Vec<MonsterTemplate>> {
    MonsterLoader::parse(MONSTERS_RON)
}

pub fn config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(COMBAT_TOML)
}

/// Bestiary over the shipped roster.
pub fn bestiary() -> LoadResult<Bestiary> {
    Bestiary::new(abilities()?, items()?, monsters()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AbilityEffect, Fighter, ItemKind, StatusEffectKind};

    #[test]
    fn shipped_config_matches_built_in_balance() {
        assert_eq!(config().unwrap(), CombatConfig::default());
    }

    #[test]
    fn shipped_roster_spawns_every_monster() {
        let bestiary = bestiary().expect("embedded content should resolve");
        assert_eq!(bestiary.len(), 23);

        let names: Vec<String> = bestiary.names().map(str::to_owned).collect();
        for name in &names {
            let monster = bestiary.spawn(name).unwrap();
            assert!(monster.is_alive(), "{name} should spawn alive");
            assert_eq!(monster.combatant.mana.maximum(), 20);
        }
    }

    #[test]
    fn goblin_matches_its_template() {
        let goblin = bestiary().unwrap().spawn("Goblin").unwrap();

        assert_eq!(goblin.combatant.health.maximum(), 30);
        assert_eq!(goblin.combatant.base_attack, 8);
        assert_eq!(goblin.combatant.base_defense, 2);
        assert_eq!(goblin.xp_yield, 25);
        assert_eq!(goblin.combatant.abilities.len(), 1);
        assert_eq!(
            goblin.combatant.abilities[0].effect,
            Some(AbilityEffect::Damage { amount: 12 })
        );
        assert_eq!(goblin.loot[0].name, "Goblin Scraps");
    }

    #[test]
    fn thalraxos_is_the_final_boss() {
        let bestiary = bestiary().unwrap();
        let boss = bestiary.spawn("thalraxos").unwrap();

        assert!(boss.final_boss);
        assert_eq!(boss.combatant.health.maximum(), 500);
        assert_eq!(boss.loot.len(), 3);
        assert_eq!(boss.loot[0].attack_bonus(), 25);
        assert_eq!(boss.loot[1].defense_bonus(), 20);

        let final_bosses = bestiary
            .names()
            .filter(|name| bestiary.template(name).is_some_and(|t| t.final_boss))
            .count();
        assert_eq!(final_bosses, 1);
    }

    #[test]
    fn status_abilities_carry_templates() {
        let bestiary = bestiary().unwrap();

        let spit = bestiary.ability("Poison Spit").unwrap();
        let template = spit.status_effect.unwrap();
        assert_eq!(template.kind, StatusEffectKind::Poison { damage_per_turn: 5 });
        assert_eq!(template.duration, 3);

        let wrath = bestiary.ability("Mountain's Wrath").unwrap();
        assert_eq!(wrath.status_effect.unwrap().kind, StatusEffectKind::Stun);
        assert!(wrath.effect.is_none());
    }

    #[test]
    fn words_and_quest_items_are_typed() {
        let bestiary = bestiary().unwrap();

        assert_eq!(bestiary.item("Word of Fire").unwrap().kind, ItemKind::Word);
        assert!(bestiary.item("Cult-marked Talisman").unwrap().quest_item);
    }

    #[test]
    fn catalog_firebolt_matches_the_starting_spell() {
        let bestiary = bestiary().unwrap();
        assert_eq!(*bestiary.ability("Firebolt").unwrap(), Ability::firebolt());
    }
}
