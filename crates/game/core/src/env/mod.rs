//! Static battlefield data and the sources that produce it.
//!
//! The [`Grid`] is generated once per session and is read-only afterwards.
//! Generation, start placement, powerup spawns and AI tie-breaks all draw from
//! an injected [`RngSource`] so sessions are reproducible from a seed.
mod error;
mod generate;
mod map;
mod rng;

pub use error::PlacementError;
pub use generate::{GeneratedGrid, find_start_positions, generate, start_corners};
pub use map::{Cell, Grid};
pub use rng::{PcgRng, RngSource, ScriptedRng, mix_seed, shuffle};
