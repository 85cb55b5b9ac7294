//! Line-of-fire geometry for bent orthogonal shots.
//!
//! Shots travel along axis-aligned segments and may change direction at
//! waypoints. [`segment`] and [`full_path`] trace a concrete plan cell by cell;
//! [`reachable`] answers whether *any* plan within a bend budget connects two
//! cells. None of these functions look at unit occupancy.
mod reach;
mod segment;

pub use reach::reachable;
pub use segment::{Ray, Segment, ShotPath, full_path, ray, segment};

use crate::state::Position;

/// Axis-aligned travel direction of a shot segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns the direction leading from `from` to `to`, or `None` when the
    /// two cells are equal or not on a shared row or column.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        if !from.is_axis_aligned_with(to) {
            return None;
        }
        let direction = if from.x == to.x {
            if to.y > from.y {
                Direction::North
            } else {
                Direction::South
            }
        } else if to.x > from.x {
            Direction::East
        } else {
            Direction::West
        };
        Some(direction)
    }

    /// Index into per-direction tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn step(self, position: Position) -> Position {
        let (dx, dy) = self.delta();
        position.offset(dx, dy)
    }
}

/// How far `b` is from sharing a row or column with `a`.
///
/// Zero means a straight, unbent line could connect the two cells.
pub fn line_offset(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x).min(a.y.abs_diff(b.y))
}
