//! Item catalog loader.

use std::path::Path;

use combat_core::Item;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ItemKind, Restores};
    use std::io::Write;

    #[test]
    fn loads_item_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                items: [
                    (name: "Iron Ore", description: "A chunk of unrefined iron.", value: 5),
                    (name: "Obsidian Blade", value: 1000, kind: Weapon(attack_bonus: 25)),
                    (name: "Healing Potion", value: 20, kind: Consumable(restores: Health, amount: 30)),
                    (name: "Word of Fire", value: 100, kind: Word),
                ],
            )"#
        )
        .unwrap();

        let items = ItemLoader::load(file.path()).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].kind, ItemKind::Misc);
        assert!(!items[0].quest_item);
        assert_eq!(items[1].attack_bonus(), 25);
        assert_eq!(
            items[2].kind,
            ItemKind::Consumable {
                restores: Restores::Health,
                amount: 30
            }
        );
        assert_eq!(items[3].kind, ItemKind::Word);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.ron");

        let err = ItemLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("items.ron"));
    }
}
