//! Asynchronous abstraction for sourcing a side's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the AI side
//! can be driven by the planner, scripted fixtures, or anything else.
use async_trait::async_trait;
use game_core::{Action, GameState, Side};

use super::errors::Result;

/// Trait for providing actions based on the current game state.
///
/// Different implementations can handle:
/// - The heuristic planner
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `side` based on a snapshot of the game.
    async fn provide_action(&self, side: Side, state: &GameState) -> Result<Action>;
}

/// A provider that always passes its turn.
/// Useful for testing or as a fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct StayActionProvider;

#[async_trait]
impl ActionProvider for StayActionProvider {
    async fn provide_action(&self, _side: Side, _state: &GameState) -> Result<Action> {
        Ok(Action::Stay)
    }
}
