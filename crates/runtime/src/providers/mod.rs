//! Action provider implementations for driving a side.

pub mod ai;

pub use ai::{AiActionProvider, AiPlanner};
