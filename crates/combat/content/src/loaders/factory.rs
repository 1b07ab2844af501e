//! Content factory for building combat content from data files.

use std::path::{Path, PathBuf};

use combat_core::{Ability, CombatConfig, Item, MonsterTemplate};

use crate::loaders::{
    AbilityLoader, Bestiary, ConfigLoader, ItemLoader, LoadResult, MonsterLoader, embedded,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── abilities.ron
/// ├── items.ron
/// └── monsters.ron
/// ```
///
/// Files that are absent fall back to the compiled-in defaults, so a data
/// directory only needs to hold what it overrides.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat balance from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return embedded::config();
        }
        ConfigLoader::load(&path)
    }

    /// Load ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<Ability>> {
        let path = self.data_dir.join("abilities.ron");
        if !path.exists() {
            return embedded::abilities();
        }
        AbilityLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return embedded::items();
        }
        ItemLoader::load(&path)
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        let path = self.data_dir.join("monsters.ron");
        if !path.exists() {
            return embedded::monsters();
        }
        MonsterLoader::load(&path)
    }

    /// Load and cross-check all three catalogs.
    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        let bestiary = Bestiary::new(
            self.load_abilities()?,
            self.load_items()?,
            self.load_monsters()?,
        )?;
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            monsters = bestiary.len(),
            "loaded bestiary"
        );
        Ok(bestiary)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_uses_embedded_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert_eq!(factory.load_bestiary().unwrap().len(), 23);
    }

    #[test]
    fn data_directory_overrides_the_roster() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("monsters.ron"),
            r#"(monsters: [(name: "Rat", health: 5, attack: 1, defense: 0, xp_yield: 2, loot: ["Leather"])])"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("combat.toml"), "player_damage_percent = 150\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let bestiary = factory.load_bestiary().unwrap();
        assert_eq!(bestiary.len(), 1);
        assert_eq!(bestiary.spawn("rat").unwrap().loot[0].name, "Leather");
        assert_eq!(factory.load_config().unwrap().player_damage_percent, 150);
    }

    #[test]
    fn broken_reference_fails_the_bestiary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("monsters.ron"),
            r#"(monsters: [(name: "Rat", health: 5, attack: 1, defense: 0, xp_yield: 2, abilities: ["Gnaw"])])"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_bestiary().unwrap_err();
        assert!(err.to_string().contains("Gnaw"));
    }
}
