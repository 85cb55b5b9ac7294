mod common;
mod turn;
mod unit;

pub use common::{Position, Side};
pub use turn::{GameOutcome, Phase, TurnState};
pub use unit::{Powerup, Powerups, Unit, Units};
