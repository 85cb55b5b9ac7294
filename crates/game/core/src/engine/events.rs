use crate::action::{Action, MoveError};
use crate::state::{GameOutcome, Position, Side};

/// Observable consequence of an engine transition, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineEvent {
    MoveCompleted {
        side: Side,
        from: Position,
        to: Position,
    },
    /// The move was accepted but the destination was no longer free when it
    /// resolved; the unit did not move.
    MoveBlocked {
        side: Side,
        target: Position,
        reason: MoveError,
    },
    ShotResolved {
        side: Side,
        path: Vec<Position>,
        valid: bool,
        hit: bool,
    },
    PowerupCollected {
        side: Side,
        position: Position,
        level: u8,
    },
    PowerupSpawned {
        position: Position,
    },
    TurnStarted {
        side: Side,
        turn: u32,
    },
    GameOver {
        outcome: GameOutcome,
    },
    SessionReset {
        used_fallback: bool,
    },
}

/// Everything that happened while resolving one accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub side: Side,
    pub action: Action,
    pub events: Vec<EngineEvent>,
    /// True when the action ended the game.
    pub game_over: bool,
}
