//! Heuristic AI action provider.

use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{Action, GameState, PcgRng, Side};

use super::{AiContext, AiPlanner};
use crate::api::{ActionProvider, Result, RuntimeError};

/// Drives a side with [`AiPlanner`].
///
/// Owns its own random stream so tie-breaking does not disturb the engine's
/// generation and spawn draws.
#[derive(Debug)]
pub struct AiActionProvider {
    rng: Mutex<PcgRng>,
}

impl AiActionProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(PcgRng::new(seed)),
        }
    }
}

#[async_trait]
impl ActionProvider for AiActionProvider {
    async fn provide_action(&self, side: Side, state: &GameState) -> Result<Action> {
        let mut rng = self.rng.lock().map_err(|_| RuntimeError::Provider {
            side,
            message: "planner random source poisoned".to_owned(),
        })?;

        let ctx = AiContext::from_state(side, state);
        Ok(AiPlanner::choose(&ctx, &mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Grid, Position, full_path};

    #[tokio::test]
    async fn provides_a_shot_when_lined_up() {
        let state = GameState::new(Grid::open(20), Position::new(4, 4), Position::new(4, 16));
        let provider = AiActionProvider::new(5);

        let action = provider.provide_action(Side::Ai, &state).await.unwrap();
        let Action::Shoot { waypoints } = action else {
            panic!("expected a shot, got {action:?}");
        };
        let shot = full_path(Position::new(4, 16), &waypoints, &state.grid);
        assert!(shot.hits(Position::new(4, 4)));
    }
}
