//! Action domain: what a side may do on its turn and whether it is legal.
//!
//! # Module Structure
//!
//! - `error`: Rejection reasons (`MoveError`, `ShootError`)
//! - `movement`: Single-step move legality against the opponent's cell
//! - `shoot`: Bend budget and full shot validation
//! - `plan`: Waypoint-by-waypoint shot planning for the player
pub mod error;
mod movement;
mod plan;
mod shoot;

pub use error::{MoveError, ShootError};
pub use movement::{Moves, valid_moves, validate_move};
pub use plan::{PlanProgress, ShotPlan, WaypointPreview};
pub use shoot::{bend_budget, validate_shot};

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::Position;

/// Ordered waypoints of a shot; holds at most one more than the largest bend
/// budget.
pub type ShotWaypoints = ArrayVec<Position, { GameConfig::MAX_LEVEL }>;

/// Discriminant of [`Action`] for logging and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Stay,
    Move,
    Shoot,
}

/// What a side does with its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Pass the turn without effect.
    Stay,
    /// Step to an adjacent cell.
    Move { target: Position },
    /// Fire along the given waypoints.
    Shoot { waypoints: ShotWaypoints },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Stay => ActionKind::Stay,
            Action::Move { .. } => ActionKind::Move,
            Action::Shoot { .. } => ActionKind::Shoot,
        }
    }

    /// Builds a shoot action, or `None` if there are more waypoints than any
    /// weapon level allows.
    pub fn shoot(waypoints: &[Position]) -> Option<Self> {
        let waypoints = ShotWaypoints::try_from(waypoints).ok()?;
        Some(Action::Shoot { waypoints })
    }

    /// Direction changes used by a shoot action; zero otherwise.
    pub fn bends(&self) -> usize {
        match self {
            Action::Shoot { waypoints } => waypoints.len().saturating_sub(1),
            _ => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Stay => f.write_str("stay"),
            Action::Move { target } => write!(f, "move to {target}"),
            Action::Shoot { waypoints } => {
                f.write_str("shoot via")?;
                for waypoint in waypoints {
                    write!(f, " {waypoint}")?;
                }
                Ok(())
            }
        }
    }
}
