//! Turn state machine and action resolution.
//!
//! The [`TurnEngine`] is the single owner of a session's [`GameState`]. Sides
//! alternate `Planning → Resolving → Planning` until a shot lands:
//!
//! ```text
//! Player.Planning → Resolving → (GameOver | Ai.Planning) → Resolving → …
//! ```
//!
//! [`TurnEngine::submit_action`] validates and resolves in one step and leaves
//! the phase at `Resolving`; the caller decides how long resolution is shown
//! before calling [`TurnEngine::end_turn`] to hand the turn over.

mod errors;
mod events;
mod resolve;

pub use errors::SubmitError;
pub use events::{EngineEvent, Resolution};

use crate::action::{
    Action, PlanProgress, ShotWaypoints, WaypointPreview, validate_move, validate_shot,
};
use crate::config::GameConfig;
use crate::env::{PcgRng, RngSource, find_start_positions, generate};
use crate::powerup;
use crate::state::{GameOutcome, GameState, Phase, Position, Side};

/// Result of placing a waypoint through the player command surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanOutcome {
    /// The plan grew; more waypoints may follow.
    Pending {
        waypoints: ShotWaypoints,
        remaining: usize,
    },
    /// The bend budget ran out and the shot was fired.
    Fired(Resolution),
}

/// Authoritative owner of one duel session.
pub struct TurnEngine<R = PcgRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
    used_fallback: bool,
}

impl<R: RngSource> TurnEngine<R> {
    /// Generates a fresh session from `config`.
    ///
    /// A placement failure yields an engine already in `GameOver` with an
    /// [`GameOutcome::Aborted`] outcome.
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let (state, used_fallback, _) = Self::start_session(&config, &mut rng);
        Self {
            config,
            state,
            rng,
            used_fallback,
        }
    }

    /// Wraps an existing state, e.g. a hand-built board.
    pub fn with_state(config: GameConfig, state: GameState, rng: R) -> Self {
        Self {
            config,
            state,
            rng,
            used_fallback: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True if the current grid is the sparse generation fallback.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Regenerates the grid, places both units at level 1, clears powerups and
    /// gives the first turn to the player.
    pub fn reset(&mut self) -> Vec<EngineEvent> {
        let (state, used_fallback, events) = Self::start_session(&self.config, &mut self.rng);
        self.state = state;
        self.used_fallback = used_fallback;
        events
    }

    fn start_session(config: &GameConfig, rng: &mut R) -> (GameState, bool, Vec<EngineEvent>) {
        let generated = generate(config.grid_size, config.wall_density, rng);
        let used_fallback = generated.used_fallback;
        let mut events = vec![EngineEvent::SessionReset { used_fallback }];

        let state = match find_start_positions(&generated.grid, rng) {
            Ok((player, ai)) => {
                let state = GameState::new(generated.grid, player, ai);
                events.push(EngineEvent::TurnStarted {
                    side: Side::Player,
                    turn: state.turn.turn,
                });
                state
            }
            Err(reason) => {
                let outcome = GameOutcome::Aborted { reason };
                events.push(EngineEvent::GameOver {
                    outcome: outcome.clone(),
                });
                GameState::aborted(generated.grid, outcome)
            }
        };

        (state, used_fallback, events)
    }

    /// Phase gate shared by every command.
    fn ensure_accepts(&self, side: Side) -> Result<(), SubmitError> {
        if self.state.is_over() {
            return Err(SubmitError::GameOver);
        }
        if self.state.phase() == Phase::Resolving {
            return Err(SubmitError::Resolving);
        }
        let active = self.state.active_side();
        if active != side {
            return Err(SubmitError::NotYourTurn { side, active });
        }
        Ok(())
    }

    /// Validates `action` for `side` and resolves it.
    ///
    /// On rejection nothing changes and the phase stays `Planning`. On success
    /// the phase is `Resolving` (or `GameOver` after a hit) until
    /// [`end_turn`](Self::end_turn).
    pub fn submit_action(&mut self, side: Side, action: Action) -> Result<Resolution, SubmitError> {
        self.ensure_accepts(side)?;

        let unit = *self.state.unit(side);
        let opponent = self.state.opponent(side).position;
        match &action {
            Action::Stay => {}
            Action::Move { target } => {
                validate_move(unit.position, *target, opponent, &self.state.grid)?;
            }
            Action::Shoot { waypoints } => {
                validate_shot(&unit, waypoints, &self.state.grid)?;
            }
        }

        self.state.turn.phase = Phase::Resolving;
        if side == Side::Player {
            self.state.plan.cancel();
        }

        let events = match &action {
            Action::Stay => Vec::new(),
            Action::Move { target } => self.resolve_move(side, *target),
            Action::Shoot { waypoints } => self.resolve_shot(side, waypoints),
        };

        Ok(Resolution {
            side,
            game_over: self.state.is_over(),
            action,
            events,
        })
    }

    /// Hands the turn to the other side after a resolution.
    ///
    /// Rolls for a powerup spawn once the phase is back to `Planning`.
    pub fn end_turn(&mut self) -> Result<Vec<EngineEvent>, SubmitError> {
        if self.state.is_over() {
            return Err(SubmitError::GameOver);
        }
        if self.state.phase() != Phase::Resolving {
            return Err(SubmitError::NotResolving);
        }

        let next = self.state.active_side().opponent();
        self.state.turn.active_side = next;
        self.state.turn.phase = Phase::Planning;
        self.state.turn.turn += 1;

        let mut events = Vec::with_capacity(2);
        if let Some(position) =
            powerup::maybe_spawn(&mut self.state, self.config.powerup_spawn_chance, &mut self.rng)
        {
            events.push(EngineEvent::PowerupSpawned { position });
        }
        events.push(EngineEvent::TurnStarted {
            side: next,
            turn: self.state.turn.turn,
        });

        Ok(events)
    }

    // ===== player command surface =====

    pub fn request_move(&mut self, target: Position) -> Result<Resolution, SubmitError> {
        self.submit_action(Side::Player, Action::Move { target })
    }

    /// Appends a waypoint to the player's shot plan, firing once the bend
    /// budget is spent.
    pub fn request_shoot_waypoint(&mut self, target: Position) -> Result<PlanOutcome, SubmitError> {
        self.ensure_accepts(Side::Player)?;

        let shooter = *self.state.unit(Side::Player);
        match self.state.plan.push(&shooter, target, &self.state.grid)? {
            PlanProgress::Pending { remaining, .. } => Ok(PlanOutcome::Pending {
                waypoints: self.state.plan.to_waypoints(),
                remaining,
            }),
            PlanProgress::Ready(waypoints) => self
                .submit_action(Side::Player, Action::Shoot { waypoints })
                .map(PlanOutcome::Fired),
        }
    }

    /// Checks a hypothetical next waypoint without changing the plan.
    pub fn preview_waypoint(&self, target: Position) -> Result<WaypointPreview, SubmitError> {
        self.ensure_accepts(Side::Player)?;
        let shooter = self.state.unit(Side::Player);
        Ok(self.state.plan.preview(shooter, target, &self.state.grid))
    }

    pub fn cancel_plan(&mut self) {
        self.state.plan.cancel();
    }

    /// Fires the player's plan with the waypoints placed so far.
    pub fn commit_plan(&mut self) -> Result<Resolution, SubmitError> {
        self.ensure_accepts(Side::Player)?;
        let waypoints = self.state.plan.commit()?;
        self.submit_action(Side::Player, Action::Shoot { waypoints })
    }
}
