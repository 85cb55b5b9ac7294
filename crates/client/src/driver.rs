//! Headless match driver.
//!
//! Plays the player's side with the same heuristic planner the AI uses,
//! going through the public command surface exactly as an interactive
//! frontend would.

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{debug, info};

use game_core::{Action, GameOutcome, PcgRng, PlanOutcome, Side, mix_seed};
use runtime::{AiPlanner, Event, GameStateEvent, RuntimeHandle, Topic};

/// How a headless match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSummary {
    pub outcome: Option<GameOutcome>,
    pub turns: u32,
}

pub struct HeadlessMatch {
    handle: RuntimeHandle,
    rng: PcgRng,
    max_turns: u32,
}

impl HeadlessMatch {
    pub fn new(handle: RuntimeHandle, seed: u64, max_turns: u32) -> Self {
        Self {
            handle,
            rng: PcgRng::new(mix_seed(seed.wrapping_add(2))),
            max_turns,
        }
    }

    /// Plays until the game ends or the turn limit is reached.
    pub async fn run(mut self) -> Result<MatchSummary> {
        let mut turn_rx = self.handle.subscribe(Topic::Turn);
        let mut game_rx = self.handle.subscribe(Topic::GameState);

        loop {
            let state = self.handle.query_state().await?;
            if state.is_over() || state.turn.turn >= self.max_turns {
                info!(turns = state.turn.turn, over = state.is_over(), "match finished");
                return Ok(MatchSummary {
                    outcome: state.outcome,
                    turns: state.turn.turn,
                });
            }

            if state.active_side() == Side::Player {
                let action = AiPlanner::choose_action(
                    state.unit(Side::Player),
                    state.unit(Side::Ai),
                    &state.grid,
                    &state.powerups,
                    &mut self.rng,
                );
                debug!(%action, "player plans");
                self.play(action).await?;
            }

            self.wait_for_player(&mut turn_rx, &mut game_rx).await?;
        }
    }

    /// Issues `action` through the player command surface.
    async fn play(&self, action: Action) -> Result<()> {
        match action {
            Action::Stay => {
                self.handle.submit_action(Side::Player, Action::Stay).await?;
            }
            Action::Move { target } => {
                self.handle.request_move(target).await?;
            }
            Action::Shoot { waypoints } => {
                for waypoint in waypoints {
                    let outcome = self
                        .handle
                        .request_shoot_waypoint(waypoint)
                        .await
                        .with_context(|| format!("waypoint {waypoint} refused"))?;
                    if let PlanOutcome::Fired(_) = outcome {
                        return Ok(());
                    }
                }
                self.handle.commit_plan().await?;
            }
        }
        Ok(())
    }

    /// Waits until it is the player's turn again or the game has ended.
    async fn wait_for_player(
        &self,
        turn_rx: &mut broadcast::Receiver<Event>,
        game_rx: &mut broadcast::Receiver<Event>,
    ) -> Result<()> {
        loop {
            tokio::select! {
                event = turn_rx.recv() => {
                    if let Event::Turn(turn) = event.context("turn events closed")?
                        && turn.side == Side::Player
                    {
                        return Ok(());
                    }
                }
                event = game_rx.recv() => {
                    if let Event::GameState(GameStateEvent::GameOver { .. }) =
                        event.context("game events closed")?
                    {
                        return Ok(());
                    }
                }
            }
        }
    }
}
