//! Player actions and their text form.

use core::str::FromStr;

use crate::ai::PlayerActionKind;
use crate::error::{CombatError, ErrorSeverity};

/// One choice at the player's input point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Attack,
    Defend,
    Parry,
    /// Casts the known ability with this 1-based number.
    Cast(usize),
    Flee,
    /// Shows both sides' status. Does not use the turn.
    Status,
}

impl PlayerAction {
    pub fn kind(&self) -> PlayerActionKind {
        match self {
            Self::Attack => PlayerActionKind::Attack,
            Self::Defend => PlayerActionKind::Defend,
            Self::Parry => PlayerActionKind::Parry,
            Self::Cast(_) => PlayerActionKind::Cast,
            Self::Flee => PlayerActionKind::Flee,
            Self::Status => PlayerActionKind::Status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,

    #[error("unknown action '{token}'")]
    UnknownAction { token: String },

    #[error("cast needs a spell number")]
    MissingSpellNumber,

    #[error("'{token}' is not a spell number")]
    InvalidSpellNumber { token: String },
}

impl CombatError for ActionParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "ACTION_EMPTY",
            Self::UnknownAction { .. } => "ACTION_UNKNOWN",
            Self::MissingSpellNumber => "ACTION_MISSING_SPELL_NUMBER",
            Self::InvalidSpellNumber { .. } => "ACTION_INVALID_SPELL_NUMBER",
        }
    }
}

impl FromStr for PlayerAction {
    type Err = ActionParseError;

    /// Accepts single letters (`a`, `d`, `p`, `c 2`, `f`, `s`) or full words,
    /// case-insensitively.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let head = parts.next().ok_or(ActionParseError::Empty)?.to_ascii_lowercase();

        let action = match head.as_str() {
            "a" | "attack" => Self::Attack,
            "d" | "defend" => Self::Defend,
            "p" | "parry" => Self::Parry,
            "f" | "flee" => Self::Flee,
            "s" | "status" => Self::Status,
            "c" | "cast" => {
                let token = parts.next().ok_or(ActionParseError::MissingSpellNumber)?;
                let number = token
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ActionParseError::InvalidSpellNumber {
                        token: token.to_string(),
                    })?;
                Self::Cast(number)
            }
            _ => {
                return Err(ActionParseError::UnknownAction {
                    token: input.trim().to_string(),
                });
            }
        };

        if let Some(extra) = parts.next() {
            return Err(ActionParseError::UnknownAction {
                token: format!("{head} {extra}"),
            });
        }
        Ok(action)
    }
}
