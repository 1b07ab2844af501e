//! What a round reports back to its caller.

use core::fmt;

use crate::error::{CombatError, ErrorSeverity};
use crate::skills::SkillKind;
use crate::state::{Fighter, Item};

use super::event::CombatEvent;

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Resolution {
    Victory,
    Defeat,
    Fled,
}

/// Terminal flag carried by every round outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterStatus {
    Ongoing,
    Victory,
    Defeat,
    Fled,
}

impl EncounterStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            Self::Ongoing => None,
            Self::Victory => Some(Resolution::Victory),
            Self::Defeat => Some(Resolution::Defeat),
            Self::Fled => Some(Resolution::Fled),
        }
    }
}

impl From<Resolution> for EncounterStatus {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Victory => Self::Victory,
            Resolution::Defeat => Self::Defeat,
            Resolution::Fled => Self::Fled,
        }
    }
}

/// Read-only view of one side after a step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack_power: i32,
    pub defense: i32,
    /// Formatted list of active effects.
    pub effects: String,
}

impl CombatantSnapshot {
    pub fn of<F: Fighter + ?Sized>(fighter: &F) -> Self {
        let c = fighter.combatant();
        Self {
            name: c.name.clone(),
            health: c.health.current(),
            max_health: c.health.maximum(),
            mana: c.mana.current(),
            max_mana: c.mana.maximum(),
            attack_power: fighter.attack_power(),
            defense: fighter.defense(),
            effects: c.status.to_string(),
        }
    }
}

impl fmt::Display for CombatantSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: HP {}/{} | MP {}/{} | Atk {} | Def {} | Effects: {}",
            self.name,
            self.health,
            self.max_health,
            self.mana,
            self.max_mana,
            self.attack_power,
            self.defense,
            self.effects
        )
    }
}

/// Spoils of a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    /// Granted to both Attack and Defense.
    pub xp_per_skill: u32,
    pub loot: Vec<Item>,
    pub final_boss: bool,
}

/// Result of one step of the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub round: u32,
    pub events: Vec<CombatEvent>,
    pub player: CombatantSnapshot,
    pub enemy: CombatantSnapshot,
    pub status: EncounterStatus,
    /// False for free actions and rejected spell choices.
    pub turn_consumed: bool,
    /// The encounter is waiting for a player action.
    pub awaiting_action: bool,
    /// Present on victory.
    pub rewards: Option<Rewards>,
    /// Skills that gained experience since this player turn started.
    pub skills_affected: Vec<SkillKind>,
}

impl RoundOutcome {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterError {
    #[error("The {name} is already defeated.")]
    AlreadyDefeated { name: String },

    #[error("You are not in combat.")]
    NotEngaged,

    #[error("the encounter already ended ({resolution})")]
    AlreadyResolved { resolution: Resolution },
}

impl CombatError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyDefeated { .. } | Self::NotEngaged => ErrorSeverity::Recoverable,
            Self::AlreadyResolved { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyDefeated { .. } => "ENCOUNTER_ALREADY_DEFEATED",
            Self::NotEngaged => "ENCOUNTER_NOT_ENGAGED",
            Self::AlreadyResolved { .. } => "ENCOUNTER_ALREADY_RESOLVED",
        }
    }
}
