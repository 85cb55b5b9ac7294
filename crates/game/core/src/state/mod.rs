//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the two units, the
//! powerups on the board, turn bookkeeping, and the terminal outcome. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! engine.
pub mod types;

pub use types::{
    GameOutcome, Phase, Position, Powerup, Powerups, Side, TurnState, Unit, Units,
};

use crate::action::ShotPlan;
use crate::env::Grid;

/// Canonical snapshot of one duel session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Battlefield layout; immutable for the lifetime of the session.
    pub grid: Grid,
    pub units: Units,
    pub powerups: Powerups,
    pub turn: TurnState,
    /// Set once the session reaches `Phase::GameOver`.
    pub outcome: Option<GameOutcome>,
    /// The player's in-progress shot plan, if they are placing waypoints.
    pub plan: ShotPlan,
}

impl GameState {
    /// Creates a fresh session with both units at level 1 and the player to move.
    pub fn new(grid: Grid, player_start: Position, ai_start: Position) -> Self {
        Self {
            grid,
            units: Units::new(player_start, ai_start),
            powerups: Powerups::new(),
            turn: TurnState::new(),
            outcome: None,
            plan: ShotPlan::new(),
        }
    }

    /// Creates a degraded, terminal session that accepts no input.
    pub fn aborted(grid: Grid, outcome: GameOutcome) -> Self {
        let mut state = Self::new(grid, Position::ORIGIN, Position::ORIGIN);
        state.turn.phase = Phase::GameOver;
        state.outcome = Some(outcome);
        state
    }

    pub fn unit(&self, side: Side) -> &Unit {
        self.units.get(side)
    }

    pub fn unit_mut(&mut self, side: Side) -> &mut Unit {
        self.units.get_mut(side)
    }

    /// Returns the unit opposing `side`.
    pub fn opponent(&self, side: Side) -> &Unit {
        self.units.get(side.opponent())
    }

    pub fn active_side(&self) -> Side {
        self.turn.active_side
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn is_over(&self) -> bool {
        self.turn.phase == Phase::GameOver || self.outcome.is_some()
    }

    pub fn powerup_at(&self, position: Position) -> Option<&Powerup> {
        self.powerups.iter().find(|p| p.position == position)
    }

    /// Returns true if `position` holds a unit or a powerup.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.units.occupies(position) || self.powerup_at(position).is_some()
    }
}
