//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the player's side or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Action, GameState, PlanOutcome, Position, Resolution, Side, WaypointPreview};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submit a complete action for `side`.
    ///
    /// The turn passes automatically once the resolution has been shown.
    pub async fn submit_action(&self, side: Side, action: Action) -> Result<Resolution> {
        self.request(|reply| Command::SubmitAction {
            side,
            action,
            reply,
        })
        .await?
    }

    /// Move the player one step.
    pub async fn request_move(&self, target: Position) -> Result<Resolution> {
        self.submit_action(Side::Player, Action::Move { target })
            .await
    }

    /// Append a waypoint to the player's shot plan.
    ///
    /// Fires on its own once the weapon's bend budget is spent.
    pub async fn request_shoot_waypoint(&self, target: Position) -> Result<PlanOutcome> {
        self.request(|reply| Command::ShootWaypoint { target, reply })
            .await?
    }

    /// Check a hypothetical next waypoint without placing it.
    pub async fn preview_waypoint(&self, target: Position) -> Result<WaypointPreview> {
        self.request(|reply| Command::PreviewWaypoint { target, reply })
            .await?
    }

    /// Discard the player's placed waypoints.
    pub async fn cancel_plan(&self) -> Result<()> {
        self.request(|reply| Command::CancelPlan { reply }).await
    }

    /// Fire the player's plan with the waypoints placed so far.
    pub async fn commit_plan(&self) -> Result<Resolution> {
        self.request(|reply| Command::CommitPlan { reply }).await?
    }

    /// Start a new session on a freshly generated grid.
    ///
    /// Any pending turn hand-off is dropped.
    pub async fn reset(&self) -> Result<GameState> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Resolutions, rejections, resets and game over
    /// - `Topic::Turn` - Turn hand-offs and powerup spawns
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut game_rx = handle.subscribe(Topic::GameState);
    /// while let Ok(event) = game_rx.recv().await {
    ///     // Handle game state events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }
}
