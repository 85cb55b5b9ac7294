use super::ShootError;
use crate::env::Grid;
use crate::geometry::{ShotPath, segment};
use crate::state::{Position, Unit};

/// Maximum number of bends a weapon of `weapon_level` allows.
#[inline]
pub fn bend_budget(weapon_level: u8) -> usize {
    usize::from(weapon_level.saturating_sub(1))
}

/// Validates a shot plan fired by `shooter` and traces it.
///
/// The plan is legal iff it is non-empty, bends at most
/// `weapon_level - 1` times, and every segment (starting from the shooter's
/// cell) is a clear axis-aligned line.
pub fn validate_shot(
    shooter: &Unit,
    waypoints: &[Position],
    grid: &Grid,
) -> Result<ShotPath, ShootError> {
    if waypoints.is_empty() {
        return Err(ShootError::Empty);
    }

    let bends = waypoints.len() - 1;
    let budget = bend_budget(shooter.weapon_level);
    if bends > budget {
        return Err(ShootError::TooManyBends { bends, budget });
    }

    let mut path = Vec::new();
    let mut from = shooter.position;
    for (index, &to) in waypoints.iter().enumerate() {
        let traced = segment(from, to, grid);
        if !traced.valid {
            return Err(ShootError::SegmentBlocked { index, from, to });
        }
        path.extend(traced.path);
        from = to;
    }

    Ok(ShotPath { path, valid: true })
}
