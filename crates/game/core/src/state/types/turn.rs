use std::fmt;

use super::Side;
use crate::env::PlacementError;

/// Lifecycle phase of the active side's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Waiting for the active side to commit an action.
    Planning,
    /// An accepted action is being applied; all input is rejected.
    Resolving,
    /// Terminal; no further actions are accepted until reset.
    GameOver,
}

/// Turn bookkeeping: whose turn it is and where in the turn we are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub active_side: Side,
    pub phase: Phase,
    /// Number of completed turn hand-offs since the session started.
    pub turn: u32,
}

impl TurnState {
    /// Creates the initial turn state: the player plans first.
    pub fn new() -> Self {
        Self {
            active_side: Side::Player,
            phase: Phase::Planning,
            turn: 0,
        }
    }

    /// Returns true if `side` may submit an action right now.
    pub fn accepts(&self, side: Side) -> bool {
        self.phase == Phase::Planning && self.active_side == side
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal result of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOutcome {
    /// A shot landed on the opponent's cell.
    Victory { winner: Side, bends: usize },
    /// The session could not start; there is no winner.
    Aborted { reason: PlacementError },
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOutcome::Victory { winner, .. } => Some(*winner),
            GameOutcome::Aborted { .. } => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Victory { winner, bends } => write!(
                f,
                "{winner} hit {} with a {bends}-bend shot",
                winner.opponent()
            ),
            GameOutcome::Aborted { reason } => write!(f, "session aborted: {reason}"),
        }
    }
}
