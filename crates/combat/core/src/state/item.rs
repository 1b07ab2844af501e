//! Item definitions carried as loot or equipment.

/// What an item does when used or equipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// No mechanical use (trophies, crafting materials, gold pouches).
    #[default]
    Misc,
    Weapon {
        attack_bonus: u32,
    },
    Armor {
        defense_bonus: u32,
    },
    Consumable {
        restores: Restores,
        amount: u32,
    },
    /// Opens something in the world.
    Key {
        unlocks: Option<String>,
    },
    /// A word of power for the Wordbinding skill.
    Word,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Restores {
    Health,
    Mana,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quest_item: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            value: 0,
            quest_item: false,
            kind,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn weapon(name: impl Into<String>, attack_bonus: u32) -> Self {
        Self::new(name, ItemKind::Weapon { attack_bonus })
    }

    pub fn armor(name: impl Into<String>, defense_bonus: u32) -> Self {
        Self::new(name, ItemKind::Armor { defense_bonus })
    }

    pub fn attack_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { attack_bonus } => attack_bonus,
            _ => 0,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Armor { defense_bonus } => defense_bonus,
            _ => 0,
        }
    }
}
