//! AI context for heuristic decision making.
//!
//! The [`AiContext`] is the read-only "blackboard" shared by candidate
//! generation and scoring. It borrows one consistent snapshot of the board
//! and answers the geometric questions the heuristics keep asking.

use game_core::{GameState, Grid, Position, Powerup, Side, Unit, reachable};

/// Snapshot of everything the planner may look at for one decision.
///
/// # Lifetime
///
/// The `'a` lifetime ties the context to the state it was built from. AI
/// evaluation happens synchronously inside a single turn, so the snapshot
/// cannot change underneath it.
#[derive(Clone, Copy, Debug)]
pub struct AiContext<'a> {
    /// The unit making the decision.
    pub me: &'a Unit,
    /// The unit being hunted.
    pub opponent: &'a Unit,
    pub grid: &'a Grid,
    pub powerups: &'a [Powerup],
}

impl<'a> AiContext<'a> {
    pub fn new(me: &'a Unit, opponent: &'a Unit, grid: &'a Grid, powerups: &'a [Powerup]) -> Self {
        Self {
            me,
            opponent,
            grid,
            powerups,
        }
    }

    /// Builds the context for `side` from a full game state.
    pub fn from_state(side: Side, state: &'a GameState) -> Self {
        Self::new(
            state.unit(side),
            state.opponent(side),
            &state.grid,
            &state.powerups,
        )
    }

    // ========================================================================
    // Scoring helpers
    // ========================================================================

    pub fn grid_size(&self) -> u32 {
        self.grid.size()
    }

    /// Whether the opponent could hit `cell` at its current weapon level.
    pub fn opponent_threatens(&self, cell: Position) -> bool {
        reachable(
            self.opponent.position,
            cell,
            self.grid,
            self.opponent.bend_budget(),
        )
    }

    /// Whether the opponent has a straight, unbent line to `cell`.
    pub fn opponent_has_direct_line(&self, cell: Position) -> bool {
        reachable(self.opponent.position, cell, self.grid, 0)
    }

    /// Whether a shot from `from` could reach the opponent using at most
    /// `bend_budget` bends.
    pub fn can_strike_from(&self, from: Position, bend_budget: usize) -> bool {
        reachable(from, self.opponent.position, self.grid, bend_budget)
    }

    pub fn has_powerup_at(&self, cell: Position) -> bool {
        self.powerups.iter().any(|powerup| powerup.position == cell)
    }

    /// Manhattan distance from `from` to the closest uncollected powerup.
    pub fn nearest_powerup_distance(&self, from: Position) -> Option<u32> {
        self.powerups
            .iter()
            .map(|powerup| from.manhattan_distance(powerup.position))
            .min()
    }
}
