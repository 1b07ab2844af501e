//! Equipped weapon and armor.

use crate::error::{CombatError, ErrorSeverity};

use super::item::{Item, ItemKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipError {
    #[error("{name} cannot be equipped")]
    NotEquippable { name: String },
}

impl CombatError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEquippable { .. } => "EQUIP_NOT_EQUIPPABLE",
        }
    }
}

/// One weapon slot and one armor slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    weapon: Option<Item>,
    armor: Option<Item>,
}

impl Equipment {
    /// Equips `item` in its slot and returns what was there before.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, EquipError> {
        let slot = match item.kind {
            ItemKind::Weapon { .. } => &mut self.weapon,
            ItemKind::Armor { .. } => &mut self.armor,
            _ => return Err(EquipError::NotEquippable { name: item.name }),
        };
        Ok(slot.replace(item))
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&Item> {
        self.armor.as_ref()
    }

    pub fn attack_bonus(&self) -> u32 {
        self.weapon.as_ref().map_or(0, Item::attack_bonus)
    }

    pub fn defense_bonus(&self) -> u32 {
        self.armor.as_ref().map_or(0, Item::defense_bonus)
    }
}
