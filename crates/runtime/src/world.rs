//! The narrow slice of the world an encounter needs.
//!
//! Exploration, persistence and world generation live elsewhere; a session
//! only has to find a target among a location's monsters, then remove the
//! body and leave the loot on the floor.

use combat_core::{Fighter, Item, Monster};

/// A place where fights happen.
pub trait Location {
    fn name(&self) -> &str;

    fn monsters(&self) -> &[Monster];

    fn monster_mut(&mut self, index: usize) -> Option<&mut Monster>;

    fn remove_monster(&mut self, index: usize) -> Option<Monster>;

    /// Drops items on the floor.
    fn add_items(&mut self, items: Vec<Item>);

    /// Index of the first monster whose name contains `query`, ignoring
    /// case. Live monsters win; a dead match is returned only when no live
    /// one exists, so the caller can report it as already defeated.
    fn find_target(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        let matches = |m: &Monster| m.name().to_lowercase().contains(&query);
        self.monsters()
            .iter()
            .position(|m| m.is_alive() && matches(m))
            .or_else(|| self.monsters().iter().position(|m| matches(m)))
    }
}

/// Location backed by plain vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLocation {
    name: String,
    monsters: Vec<Monster>,
    items: Vec<Item>,
}

impl InMemoryLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            monsters: Vec::new(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_monster(mut self, monster: Monster) -> Self {
        self.monsters.push(monster);
        self
    }

    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.push(monster);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Location for InMemoryLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    fn monster_mut(&mut self, index: usize) -> Option<&mut Monster> {
        self.monsters.get_mut(index)
    }

    fn remove_monster(&mut self, index: usize) -> Option<Monster> {
        (index < self.monsters.len()).then(|| self.monsters.remove(index))
    }

    fn add_items(&mut self, items: Vec<Item>) {
        self.items.extend(items);
    }
}
