//! Event types for different topics.

use game_core::{EngineEvent, ErrorSeverity, GameOutcome, Position, Resolution, Side};
use serde::{Deserialize, Serialize};

/// Events related to game state changes (actions, rejections, resets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An action was accepted and resolved.
    ActionResolved(Resolution),

    /// A command was refused by the engine; state is unchanged.
    ActionRejected {
        side: Side,
        code: String,
        severity: ErrorSeverity,
        reason: String,
    },

    /// A new session started.
    SessionReset {
        used_fallback: bool,
        player: Position,
        ai: Position,
    },

    /// The session reached a terminal outcome.
    GameOver { outcome: GameOutcome },
}

/// Events related to turn hand-offs (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    /// Side that plans next.
    pub side: Side,
    /// Hand-off counter since the session started.
    pub turn: u32,
    /// Powerup spawned during this hand-off, if any.
    pub spawned: Option<Position>,
}

impl TurnEvent {
    /// Folds the engine's hand-off events into one turn event.
    pub(crate) fn from_engine(events: &[EngineEvent]) -> Option<Self> {
        let spawned = events.iter().find_map(|event| match event {
            EngineEvent::PowerupSpawned { position } => Some(*position),
            _ => None,
        });
        events.iter().find_map(|event| match event {
            EngineEvent::TurnStarted { side, turn } => Some(Self {
                side: *side,
                turn: *turn,
                spawned,
            }),
            _ => None,
        })
    }
}
