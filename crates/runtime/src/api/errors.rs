//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the encounter state machine, content loading and the
//! action source so callers can bubble them up with consistent context.
use thiserror::Error;

use combat_core::{ActionParseError, CombatError, EncounterError, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Attacking with nothing matching to attack.
    #[error("There is no '{name}' here to attack.")]
    NoSuchTarget { name: String },

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error(transparent)]
    InvalidAction(#[from] ActionParseError),

    #[error("action source ran out of input")]
    InputExhausted,

    #[error("failed to read player input")]
    Input(#[source] std::io::Error),

    #[error("failed to load combat content")]
    Content(#[source] anyhow::Error),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSuchTarget { .. } => ErrorSeverity::Recoverable,
            Self::Encounter(e) => e.severity(),
            Self::InvalidAction(e) => e.severity(),
            Self::InputExhausted | Self::Input(_) | Self::Content(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchTarget { .. } => "RUNTIME_NO_SUCH_TARGET",
            Self::Encounter(e) => e.error_code(),
            Self::InvalidAction(e) => e.error_code(),
            Self::InputExhausted => "RUNTIME_INPUT_EXHAUSTED",
            Self::Input(_) => "RUNTIME_INPUT",
            Self::Content(_) => "RUNTIME_CONTENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err = RuntimeError::from(EncounterError::NotEngaged);
        assert_eq!(err.error_code(), "ENCOUNTER_NOT_ENGAGED");
        assert!(err.severity().is_recoverable());

        let err = RuntimeError::NoSuchTarget {
            name: "dragon".into(),
        };
        assert_eq!(err.to_string(), "There is no 'dragon' here to attack.");
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    }

    #[test]
    fn input_failures_are_fatal() {
        assert_eq!(RuntimeError::InputExhausted.severity(), ErrorSeverity::Fatal);
    }
}
