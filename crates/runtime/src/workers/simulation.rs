//! Simulation worker that owns the authoritative [`game_core::TurnEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes them through the
//! engine, and publishes events to the EventBus. The worker is the only task
//! touching game state, so everything it does is sequential: a command is
//! handled to completion before the next one is read.
//!
//! Time-based pauses are modelled as a single pending step with a deadline.
//! While a step is pending the engine sits in `Resolving` (or the AI is
//! "thinking"), and player commands bounce off the engine's phase gate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use game_core::{
    Action, ActionKind, EngineEvent, GameError, GameState, PcgRng, Phase, PlanOutcome, Position,
    Resolution, Side, SubmitError, TurnEngine, WaypointPreview,
};

use crate::api::{ActionProvider, Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, TurnEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Submit a complete action for a side.
    SubmitAction {
        side: Side,
        action: Action,
        reply: oneshot::Sender<Result<Resolution>>,
    },
    /// Append a waypoint to the player's shot plan.
    ShootWaypoint {
        target: Position,
        reply: oneshot::Sender<Result<PlanOutcome>>,
    },
    /// Check a hypothetical next waypoint.
    PreviewWaypoint {
        target: Position,
        reply: oneshot::Sender<Result<WaypointPreview>>,
    },
    /// Discard the player's shot plan.
    CancelPlan { reply: oneshot::Sender<()> },
    /// Fire the player's shot plan as it stands.
    CommitPlan {
        reply: oneshot::Sender<Result<Resolution>>,
    },
    /// Start a new session.
    Reset { reply: oneshot::Sender<GameState> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Pauses applied between resolution and the next turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnTiming {
    /// Extra time a shot's path stays on display.
    pub post_shot_flash: Duration,
    /// Pause after every resolution before the turn passes.
    pub inter_turn_pause: Duration,
    /// Delay before the AI side acts.
    pub ai_thinking_delay: Duration,
}

impl TurnTiming {
    /// Time between resolving `kind` and handing the turn over.
    pub fn resolution_delay(&self, kind: ActionKind) -> Duration {
        match kind {
            ActionKind::Shoot => self.post_shot_flash + self.inter_turn_pause,
            ActionKind::Stay | ActionKind::Move => self.inter_turn_pause,
        }
    }
}

/// Deferred work the worker runs once its deadline passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Hand the turn to the other side.
    EndTurn,
    /// Ask the AI provider for its action.
    AiTurn,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    step: Step,
    deadline: Instant,
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    engine: TurnEngine<PcgRng>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    ai_provider: Arc<dyn ActionProvider>,
    timing: TurnTiming,
    pending: Option<Pending>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        engine: TurnEngine<PcgRng>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        ai_provider: Arc<dyn ActionProvider>,
        timing: TurnTiming,
    ) -> Self {
        let state = engine.state();
        info!(
            grid_size = state.grid.size(),
            walls = state.grid.wall_count(),
            player = %state.units.player.position,
            ai = %state.units.ai.position,
            "SimulationWorker initialized"
        );
        if engine.used_fallback() {
            warn!("grid generation fell back to the sparse layout");
        }

        let mut worker = Self {
            engine,
            command_rx,
            event_bus,
            ai_provider,
            timing,
            pending: None,
        };
        worker.schedule_ai_if_due();
        worker
    }

    /// Main worker loop.
    ///
    /// Exits once every command sender has been dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self.pending.map(|pending| pending.deadline);
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.run_pending().await;
                }
            }
        }
        debug!("simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitAction {
                side,
                action,
                reply,
            } => {
                let result = self.submit(side, action);
                if reply.send(result).is_err() {
                    debug!("SubmitAction reply channel closed (caller dropped)");
                }
            }
            Command::ShootWaypoint { target, reply } => {
                let result = match self.engine.request_shoot_waypoint(target) {
                    Ok(PlanOutcome::Fired(resolution)) => {
                        self.after_resolution(&resolution);
                        Ok(PlanOutcome::Fired(resolution))
                    }
                    Ok(pending) => Ok(pending),
                    Err(error) => Err(self.reject(Side::Player, error)),
                };
                if reply.send(result).is_err() {
                    debug!("ShootWaypoint reply channel closed (caller dropped)");
                }
            }
            Command::PreviewWaypoint { target, reply } => {
                let result = self
                    .engine
                    .preview_waypoint(target)
                    .map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("PreviewWaypoint reply channel closed (caller dropped)");
                }
            }
            Command::CancelPlan { reply } => {
                self.engine.cancel_plan();
                if reply.send(()).is_err() {
                    debug!("CancelPlan reply channel closed (caller dropped)");
                }
            }
            Command::CommitPlan { reply } => {
                let result = match self.engine.commit_plan() {
                    Ok(resolution) => {
                        self.after_resolution(&resolution);
                        Ok(resolution)
                    }
                    Err(error) => Err(self.reject(Side::Player, error)),
                };
                if reply.send(result).is_err() {
                    debug!("CommitPlan reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.reset();
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Submits through the engine, publishing either the resolution or the
    /// rejection.
    fn submit(&mut self, side: Side, action: Action) -> Result<Resolution> {
        match self.engine.submit_action(side, action) {
            Ok(resolution) => {
                self.after_resolution(&resolution);
                Ok(resolution)
            }
            Err(error) => Err(self.reject(side, error)),
        }
    }

    /// Publishes an accepted resolution and schedules the hand-off.
    fn after_resolution(&mut self, resolution: &Resolution) {
        let kind = resolution.action.kind();
        info!(
            side = %resolution.side,
            action = %resolution.action,
            game_over = resolution.game_over,
            "action resolved"
        );

        self.publish_state(GameStateEvent::ActionResolved(resolution.clone()));

        if resolution.game_over {
            self.pending = None;
            if let Some(outcome) = self.engine.state().outcome.clone() {
                info!(?outcome, "game over");
                self.publish_state(GameStateEvent::GameOver { outcome });
            }
            return;
        }

        self.schedule(Step::EndTurn, self.timing.resolution_delay(kind));
    }

    fn reject(&self, side: Side, error: SubmitError) -> RuntimeError {
        let severity = error.severity();
        debug!(
            %side,
            code = error.error_code(),
            severity = severity.as_str(),
            reason = %error,
            "command rejected"
        );
        self.publish_state(GameStateEvent::ActionRejected {
            side,
            code: error.error_code().to_owned(),
            severity,
            reason: error.to_string(),
        });
        RuntimeError::Rejected(error)
    }

    fn reset(&mut self) {
        self.pending = None;
        let events = self.engine.reset();

        let state = self.engine.state();
        let used_fallback = self.engine.used_fallback();
        if used_fallback {
            warn!("grid generation fell back to the sparse layout");
        }
        info!(
            walls = state.grid.wall_count(),
            player = %state.units.player.position,
            ai = %state.units.ai.position,
            "session reset"
        );

        self.publish_state(GameStateEvent::SessionReset {
            used_fallback,
            player: state.units.player.position,
            ai: state.units.ai.position,
        });
        self.publish_engine_events(&events);
        self.schedule_ai_if_due();
    }

    /// Forwards turn and game-over notifications produced outside an action.
    fn publish_engine_events(&self, events: &[EngineEvent]) {
        if let Some(turn) = TurnEvent::from_engine(events) {
            self.event_bus.publish(Event::Turn(turn));
        }
        for event in events {
            if let EngineEvent::GameOver { outcome } = event {
                warn!(?outcome, "session ended without play");
                self.publish_state(GameStateEvent::GameOver {
                    outcome: outcome.clone(),
                });
            }
        }
    }

    fn publish_state(&self, event: GameStateEvent) {
        self.event_bus.publish(Event::GameState(event));
    }

    fn schedule(&mut self, step: Step, delay: Duration) {
        self.pending = Some(Pending {
            step,
            deadline: Instant::now() + delay,
        });
    }

    /// Queues the AI's turn when it is the AI's move.
    fn schedule_ai_if_due(&mut self) {
        let state = self.engine.state();
        if state.active_side() == Side::Ai && state.phase() == Phase::Planning {
            self.schedule(Step::AiTurn, self.timing.ai_thinking_delay);
        }
    }

    async fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.step {
            Step::EndTurn => self.end_turn(),
            Step::AiTurn => self.ai_turn().await,
        }
    }

    fn end_turn(&mut self) {
        match self.engine.end_turn() {
            Ok(events) => {
                debug!(
                    side = %self.engine.state().active_side(),
                    turn = self.engine.state().turn.turn,
                    "turn started"
                );
                self.publish_engine_events(&events);
                self.schedule_ai_if_due();
            }
            Err(error) => {
                debug!(reason = %error, "turn hand-off skipped");
            }
        }
    }

    /// Asks the provider for the AI's action and submits it.
    ///
    /// A failing provider or an action the engine refuses is replaced by
    /// `Stay` so the turn always passes.
    async fn ai_turn(&mut self) {
        let state = self.engine.state();
        if state.active_side() != Side::Ai || state.phase() != Phase::Planning {
            return;
        }

        let snapshot = state.clone();
        let action = match self.ai_provider.provide_action(Side::Ai, &snapshot).await {
            Ok(action) => action,
            Err(error) => {
                warn!(%error, "AI provider failed, staying");
                Action::Stay
            }
        };

        if self.submit(Side::Ai, action).is_err() {
            warn!("AI action rejected, staying");
            if let Err(error) = self.submit(Side::Ai, Action::Stay) {
                warn!(%error, "AI could not pass its turn");
            }
        }
    }
}
