//! Deterministic duel rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules of the bent-shot duel (grid
//! generation, line-of-fire geometry, powerups, action validation, the turn
//! engine) and exposes pure APIs. All state mutation flows through
//! [`engine::TurnEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod powerup;
pub mod state;

pub use action::{
    Action, ActionKind, MoveError, Moves, PlanProgress, ShootError, ShotPlan, ShotWaypoints,
    WaypointPreview, bend_budget, valid_moves, validate_move, validate_shot,
};
pub use config::GameConfig;
pub use engine::{EngineEvent, PlanOutcome, Resolution, SubmitError, TurnEngine};
pub use env::{
    Cell, GeneratedGrid, Grid, PcgRng, PlacementError, RngSource, ScriptedRng,
    find_start_positions, generate, mix_seed, shuffle, start_corners,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{
    Direction, Ray, Segment, ShotPath, full_path, line_offset, ray, reachable, segment,
};
pub use state::{
    GameOutcome, GameState, Phase, Position, Powerup, Powerups, Side, TurnState, Unit, Units,
};
