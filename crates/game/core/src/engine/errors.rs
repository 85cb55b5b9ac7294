//! Error types for the turn engine's phase gate.

use crate::action::{MoveError, ShootError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::Side;

/// Reasons the engine refused a command.
///
/// A rejected command never mutates state; the `Display` text is the reason
/// shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitError {
    #[error("the game is over")]
    GameOver,

    #[error("it is {active}'s turn, not {side}'s")]
    NotYourTurn { side: Side, active: Side },

    #[error("an action is still resolving")]
    Resolving,

    #[error("no action is resolving")]
    NotResolving,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("illegal shot: {0}")]
    Shoot(#[from] ShootError),
}

impl GameError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Fatal,
            Self::NotYourTurn { .. } | Self::NotResolving => ErrorSeverity::Validation,
            Self::Resolving => ErrorSeverity::Recoverable,
            Self::Move(err) => err.severity(),
            Self::Shoot(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "SUBMIT_GAME_OVER",
            Self::NotYourTurn { .. } => "SUBMIT_NOT_YOUR_TURN",
            Self::Resolving => "SUBMIT_RESOLVING",
            Self::NotResolving => "SUBMIT_NOT_RESOLVING",
            Self::Move(err) => err.error_code(),
            Self::Shoot(err) => err.error_code(),
        }
    }
}
