//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the turn engine, executes commands and paces
//! turn hand-offs.

mod simulation;

pub use simulation::{Command, SimulationWorker, TurnTiming};
