//! Runtime orchestration for the bent-shot duel.
//!
//! This crate wires the turn engine, the action provider abstraction, the
//! heuristic AI and a worker task into a cohesive async API. Consumers embed
//! [`Runtime`] to run a session, subscribe to events, and drive the player's
//! side through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the heuristic AI planner
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle, StayActionProvider};
pub use events::{Event, EventBus, GameStateEvent, Topic, TurnEvent};
pub use providers::{AiActionProvider, AiPlanner};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::TurnTiming;
