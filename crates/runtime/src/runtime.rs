//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a duel.

use std::env;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{GameConfig, GameState, PcgRng, TurnEngine};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::providers::AiActionProvider;
use crate::workers::{Command, SimulationWorker, TurnTiming};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Extra time a shot's path stays on display before the turn passes.
    pub post_shot_flash: Duration,
    /// Pause after every resolution.
    pub inter_turn_pause: Duration,
    /// Delay before the AI acts.
    pub ai_thinking_delay: Duration,
    /// Session seed; drawn from the clock when unset.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_POST_SHOT_FLASH: Duration = Duration::from_millis(600);
    pub const DEFAULT_INTER_TURN_PAUSE: Duration = Duration::from_millis(300);
    pub const DEFAULT_AI_THINKING_DELAY: Duration = Duration::from_millis(500);

    /// Configuration with every pause set to zero.
    pub fn instant() -> Self {
        Self {
            post_shot_flash: Duration::ZERO,
            inter_turn_pause: Duration::ZERO,
            ai_thinking_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_GRID_SIZE` - Side length of the square grid (default: 20)
    /// - `DUEL_WALL_DENSITY` - Fraction of cells turned into walls (default: 0.15)
    /// - `DUEL_POWERUP_CHANCE` - Spawn probability per hand-off (default: 0.6)
    /// - `DUEL_SEED` - Session seed (default: clock-derived)
    /// - `DUEL_POST_SHOT_FLASH_MS` - Shot display time (default: 600)
    /// - `DUEL_INTER_TURN_PAUSE_MS` - Pause after each resolution (default: 300)
    /// - `DUEL_AI_THINKING_MS` - AI delay (default: 500)
    /// - `DUEL_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `DUEL_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<u32>("DUEL_GRID_SIZE") {
            config.game_config = config.game_config.with_grid_size(size);
        }
        if let Some(density) = read_env::<f64>("DUEL_WALL_DENSITY") {
            config.game_config = config.game_config.with_wall_density(density);
        }
        if let Some(chance) = read_env::<f64>("DUEL_POWERUP_CHANCE") {
            config.game_config = config.game_config.with_powerup_spawn_chance(chance);
        }

        config.seed = read_env::<u64>("DUEL_SEED");

        if let Some(ms) = read_env::<u64>("DUEL_POST_SHOT_FLASH_MS") {
            config.post_shot_flash = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("DUEL_INTER_TURN_PAUSE_MS") {
            config.inter_turn_pause = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("DUEL_AI_THINKING_MS") {
            config.ai_thinking_delay = Duration::from_millis(ms);
        }

        if let Some(capacity) = read_env::<usize>("DUEL_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("DUEL_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn timing(&self) -> TurnTiming {
        TurnTiming {
            post_shot_flash: self.post_shot_flash,
            inter_turn_pause: self.inter_turn_pause,
            ai_thinking_delay: self.ai_thinking_delay,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            post_shot_flash: Self::DEFAULT_POST_SHOT_FLASH,
            inter_turn_pause: Self::DEFAULT_INTER_TURN_PAUSE,
            ai_thinking_delay: Self::DEFAULT_AI_THINKING_DELAY,
            seed: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates a duel session
///
/// Design: Runtime owns the worker task. [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    seed: u64,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed the session was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone has
    /// been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    ai_provider: Option<Arc<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            ai_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the session seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Provide an initial game state instead of generating one
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the provider driving the AI side (default: [`AiActionProvider`])
    pub fn ai_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.ai_provider = Some(Arc::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let seed = self.config.seed.unwrap_or_else(clock_seed);
        let engine_rng = PcgRng::new(seed);
        let game_config = self.config.game_config.clone();

        let engine = match self.state {
            Some(state) => TurnEngine::with_state(game_config, state, engine_rng),
            None => TurnEngine::new(game_config, engine_rng),
        };

        let ai_provider = self.ai_provider.unwrap_or_else(|| {
            Arc::new(AiActionProvider::new(seed.wrapping_add(1))) as Arc<dyn ActionProvider>
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        tracing::info!(seed, "building runtime");
        let sim_worker = SimulationWorker::new(
            engine,
            command_rx,
            event_bus,
            ai_provider,
            self.config.timing(),
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            seed,
            sim_worker_handle,
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
