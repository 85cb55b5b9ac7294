//! Action validation errors.
//!
//! The `Display` text of each variant is the human-readable rejection reason
//! surfaced to the player.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

// ============================================================================
// Movement Errors
// ============================================================================

/// Reasons a requested move is illegal against the current board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("destination {to} is not adjacent to {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is a wall")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied by the opponent")]
    Occupied { destination: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAdjacent { .. } | Self::OutOfBounds { .. } => ErrorSeverity::Validation,
            Self::Blocked { .. } | Self::Occupied { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

// ============================================================================
// Shooting Errors
// ============================================================================

/// Reasons a shot plan or a single waypoint is illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShootError {
    #[error("shot has no waypoints")]
    Empty,

    #[error("shot bends {bends} times but the weapon allows {budget}")]
    TooManyBends { bends: usize, budget: usize },

    /// Covers diagonal, zero-length, wall-blocked and off-grid segments.
    #[error("segment {index} from {from} to {to} is not a clear straight line")]
    SegmentBlocked {
        index: usize,
        from: Position,
        to: Position,
    },
}

impl GameError for ShootError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Empty | Self::TooManyBends { .. } => ErrorSeverity::Validation,
            Self::SegmentBlocked { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "SHOOT_EMPTY",
            Self::TooManyBends { .. } => "SHOOT_TOO_MANY_BENDS",
            Self::SegmentBlocked { .. } => "SHOOT_SEGMENT_BLOCKED",
        }
    }
}
