//! Monster spawning from loaded catalogs.

use std::collections::HashMap;

use combat_core::{Ability, Item, Monster, MonsterTemplate, SharedAbility};

use crate::loaders::LoadResult;

/// Resolved monster catalog.
///
/// Construction checks every ability and loot reference in every template,
/// so a bestiary that exists can always spawn its monsters.
#[derive(Debug, Clone)]
pub struct Bestiary {
    abilities: HashMap<String, SharedAbility>,
    items: HashMap<String, Item>,
    templates: Vec<MonsterTemplate>,
}

impl Bestiary {
    pub fn new(
        abilities: Vec<Ability>,
        items: Vec<Item>,
        templates: Vec<MonsterTemplate>,
    ) -> LoadResult<Self> {
        let mut ability_index = HashMap::with_capacity(abilities.len());
        for ability in abilities {
            let name = ability.name.clone();
            if ability_index.insert(name.clone(), ability.shared()).is_some() {
                anyhow::bail!("Duplicate ability '{}' in catalog", name);
            }
        }

        let mut item_index = HashMap::with_capacity(items.len());
        for item in items {
            let name = item.name.clone();
            if item_index.insert(name.clone(), item).is_some() {
                anyhow::bail!("Duplicate item '{}' in catalog", name);
            }
        }

        for (i, template) in templates.iter().enumerate() {
            if templates[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&template.name))
            {
                anyhow::bail!("Duplicate monster '{}' in catalog", template.name);
            }
            for id in &template.abilities {
                if !ability_index.contains_key(id) {
                    anyhow::bail!(
                        "Monster '{}' references unknown ability '{}'",
                        template.name,
                        id
                    );
                }
            }
            for id in &template.loot {
                if !item_index.contains_key(id) {
                    anyhow::bail!(
                        "Monster '{}' references unknown item '{}'",
                        template.name,
                        id
                    );
                }
            }
        }

        Ok(Self {
            abilities: ability_index,
            items: item_index,
            templates,
        })
    }

    /// Spawns a fresh monster by name (case-insensitive).
    pub fn spawn(&self, name: &str) -> LoadResult<Monster> {
        let template = self
            .template(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown monster '{}'", name))?;
        self.spawn_template(template)
    }

    /// Spawns a monster from a template, resolving its references against
    /// this bestiary's catalogs.
    pub fn spawn_template(&self, template: &MonsterTemplate) -> LoadResult<Monster> {
        let abilities = template
            .abilities
            .iter()
            .map(|id| {
                self.ability(id).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Monster '{}' references unknown ability '{}'",
                        template.name,
                        id
                    )
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let loot = template
            .loot
            .iter()
            .map(|id| {
                self.item(id).cloned().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Monster '{}' references unknown item '{}'",
                        template.name,
                        id
                    )
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        tracing::debug!(
            monster = %template.name,
            abilities = abilities.len(),
            loot = loot.len(),
            "spawned monster"
        );

        Ok(Monster::from_template(template, abilities, loot))
    }

    pub fn template(&self, name: &str) -> Option<&MonsterTemplate> {
        self.templates
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
    }

    /// Shared handle to a catalog ability, e.g. for a player to learn.
    pub fn ability(&self, name: &str) -> Option<SharedAbility> {
        self.abilities.get(name).cloned()
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Monster names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.iter().map(|template| template.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
