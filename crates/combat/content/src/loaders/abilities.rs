//! Ability catalog loader.

use std::path::Path;

use combat_core::Ability;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
///
/// Abilities are referenced from monster templates by `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<Ability>,
}

/// Loader for ability catalogs from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Ability>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an ability catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Ability>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        Ok(catalog.abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AbilityEffect, StatusEffectKind};

    #[test]
    fn parses_direct_and_status_abilities() {
        let abilities = AbilityLoader::parse(
            r#"(
                abilities: [
                    (
                        name: "Shank",
                        description: "A quick, nasty stab.",
                        mana_cost: 4,
                        effect: Some(Damage(amount: 12)),
                    ),
                    (
                        name: "Poison Spit",
                        mana_cost: 5,
                        status_effect: Some((kind: Poison(damage_per_turn: 5), duration: 3)),
                    ),
                ],
            )"#,
        )
        .expect("catalog should parse");

        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0].effect, Some(AbilityEffect::Damage { amount: 12 }));
        assert!(abilities[0].status_effect.is_none());

        let spit = &abilities[1];
        assert!(spit.effect.is_none());
        assert!(spit.description.is_empty());
        let template = spit.status_effect.expect("status effect");
        assert_eq!(template.kind, StatusEffectKind::Poison { damage_per_turn: 5 });
        assert_eq!(template.duration, 3);
    }

    #[test]
    fn reports_parse_failures() {
        let err = AbilityLoader::parse("(abilities: [(name: 3)])").unwrap_err();
        assert!(err.to_string().contains("ability catalog"));
    }
}
