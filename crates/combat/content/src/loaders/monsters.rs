//! Monster template loader.

use std::path::Path;

use combat_core::MonsterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Monster catalog structure for RON files.
///
/// Templates reference abilities and loot by catalog name; the
/// [`Bestiary`](crate::loaders::Bestiary) resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterTemplate>,
}

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterTemplate>> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        Ok(catalog.monsters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::DEFAULT_MANA;

    #[test]
    fn optional_fields_take_defaults() {
        let monsters = MonsterLoader::parse(
            r#"(
                monsters: [
                    (name: "Skeleton", health: 40, attack: 10, defense: 3, xp_yield: 30),
                    (
                        name: "Thalraxos",
                        health: 500,
                        attack: 35,
                        defense: 15,
                        mana: 60,
                        xp_yield: 2000,
                        abilities: ["Shadowflame"],
                        loot: ["Obsidian Blade"],
                        final_boss: true,
                    ),
                ],
            )"#,
        )
        .unwrap();

        let skeleton = &monsters[0];
        assert_eq!(skeleton.mana, DEFAULT_MANA);
        assert!(skeleton.abilities.is_empty());
        assert!(skeleton.loot.is_empty());
        assert!(!skeleton.final_boss);

        let boss = &monsters[1];
        assert_eq!(boss.mana, 60);
        assert_eq!(boss.abilities, vec!["Shadowflame".to_string()]);
        assert!(boss.final_boss);
    }
}
