//! Procedural battlefield generation and start placement.

use super::error::PlacementError;
use super::map::{Cell, Grid};
use super::rng::{RngSource, shuffle};
use crate::config::GameConfig;
use crate::state::Position;

/// A generated grid plus whether the sparse fallback had to be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub used_fallback: bool,
}

/// Generates a connected battlefield of `size × size` cells.
///
/// Up to [`GameConfig::GENERATION_ATTEMPTS`] random layouts at `wall_density`
/// are tried; the first whose floor is a single connected component wins.
/// When none qualifies, a sparse layout that is connected by construction is
/// returned with `used_fallback` set.
pub fn generate<R>(size: u32, wall_density: f64, rng: &mut R) -> GeneratedGrid
where
    R: RngSource + ?Sized,
{
    let density = wall_density.clamp(0.0, 1.0);

    for _ in 0..GameConfig::GENERATION_ATTEMPTS {
        let grid = scatter_walls(size, density, rng);
        if grid.is_connected() {
            return GeneratedGrid {
                grid,
                used_fallback: false,
            };
        }
    }

    GeneratedGrid {
        grid: fallback_grid(size, rng),
        used_fallback: true,
    }
}

/// The four cells units prefer to start on: one per quadrant, inset by one.
pub fn start_corners(size: u32) -> [Position; 4] {
    let far = (size as i32 - 2).max(0);
    let near = 1.min(far);
    [
        Position::new(near, near),
        Position::new(far, near),
        Position::new(near, far),
        Position::new(far, far),
    ]
}

fn near_start_corner(corners: &[Position; 4], position: Position) -> bool {
    corners
        .iter()
        .any(|corner| corner.chebyshev_distance(position) <= GameConfig::CORNER_MARGIN as u32)
}

fn wall_target(size: u32, density: f64) -> usize {
    let total = (size as usize) * (size as usize);
    ((total as f64) * density).floor() as usize
}

/// One generation pass: drop walls on random cells until the target count is
/// reached or the draw budget runs out. Cells near a start corner only accept
/// a wall with probability [`GameConfig::CORNER_WALL_CHANCE`].
fn scatter_walls<R>(size: u32, density: f64, rng: &mut R) -> Grid
where
    R: RngSource + ?Sized,
{
    let mut grid = Grid::open(size);
    let target = wall_target(size, density);
    let corners = start_corners(size);
    let budget = target.saturating_mul(GameConfig::WALL_PLACEMENT_FACTOR);

    let mut placed = 0;
    let mut draws = 0;
    while placed < target && draws < budget {
        draws += 1;
        let position = Position::new(rng.below(size) as i32, rng.below(size) as i32);
        if !grid.is_floor(position) {
            continue;
        }
        if near_start_corner(&corners, position) && !rng.chance(GameConfig::CORNER_WALL_CHANCE) {
            continue;
        }
        grid.set(position, Cell::Wall);
        placed += 1;
    }

    grid
}

/// Sparse layout that keeps each wall only if the floor stays connected.
fn fallback_grid<R>(size: u32, rng: &mut R) -> Grid
where
    R: RngSource + ?Sized,
{
    let mut grid = Grid::open(size);
    let target = wall_target(size, GameConfig::FALLBACK_WALL_DENSITY);
    let corners = start_corners(size);
    let budget = target.saturating_mul(GameConfig::WALL_PLACEMENT_FACTOR);

    let mut placed = 0;
    let mut draws = 0;
    while placed < target && draws < budget {
        draws += 1;
        let position = Position::new(rng.below(size) as i32, rng.below(size) as i32);
        if !grid.is_floor(position) || near_start_corner(&corners, position) {
            continue;
        }
        grid.set(position, Cell::Wall);
        if grid.is_connected() {
            placed += 1;
        } else {
            grid.set(position, Cell::Floor);
        }
    }

    grid
}

/// Picks start cells for the player and the AI.
///
/// The player starts on the floor cell nearest the first corner. The other
/// three corners are tried in random order for the AI, accepting the first
/// whose nearest floor cell is more than `0.6 × size` away (Manhattan) from
/// the player. Otherwise the AI starts on the floor cell nearest the centre.
pub fn find_start_positions<R>(
    grid: &Grid,
    rng: &mut R,
) -> Result<(Position, Position), PlacementError>
where
    R: RngSource + ?Sized,
{
    let corners = start_corners(grid.size());
    let player = grid
        .nearest_floor(corners[0], |_| false)
        .ok_or(PlacementError::NoFloor)?;

    let min_distance = GameConfig::START_DISTANCE_RATIO * f64::from(grid.size());
    let mut candidates = [corners[1], corners[2], corners[3]];
    shuffle(rng, &mut candidates);

    for corner in candidates {
        let Some(ai) = grid.nearest_floor(corner, |p| p == player) else {
            continue;
        };
        if f64::from(ai.manhattan_distance(player)) > min_distance {
            return Ok((player, ai));
        }
    }

    let center = Position::new(grid.size() as i32 / 2, grid.size() as i32 / 2);
    grid.nearest_floor(center, |p| p == player)
        .map(|ai| (player, ai))
        .ok_or(PlacementError::SingleFloorCell)
}
