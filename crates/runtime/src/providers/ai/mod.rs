//! Heuristic AI planner.
//!
//! Decision-making happens in three steps:
//!
//! 1. **Candidate generation**: `Stay`, every legal step, and every valid
//!    shot plan within a small bend limit
//! 2. **Scoring**: each candidate is scored by independent heuristics
//!    evaluated at the cell the unit ends up on (hit, pickup, threat, cover,
//!    powerup approach, distance band, offence, jitter)
//! 3. **Selection**: a strictly higher score wins, and near ties are broken
//!    by chance
//!
//! # Core Components
//!
//! - [`AiActionProvider`]: Async provider implementing [`crate::ActionProvider`]
//! - [`AiPlanner`]: Pure selection over a board snapshot
//! - [`ActionCandidateGenerator`]: Enumerates candidates
//! - [`AiContext`]: Shared snapshot with geometry helpers

pub mod context;
pub mod generator;
pub mod planner;
pub mod provider;
pub mod scoring;

pub use context::AiContext;
pub use generator::{AI_MAX_BEND_CHECK_DEPTH, ActionCandidateGenerator, Candidate};
pub use planner::AiPlanner;
pub use provider::AiActionProvider;
pub use scoring::Score;
