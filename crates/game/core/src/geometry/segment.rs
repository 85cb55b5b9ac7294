use super::Direction;
use crate::env::Grid;
use crate::state::Position;

/// Cells traversed by one straight segment of a shot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Cells entered after leaving the start, in travel order.
    pub path: Vec<Position>,
    /// True if the segment reached its end cell without leaving the grid or
    /// entering a wall.
    pub valid: bool,
}

impl Segment {
    fn invalid(path: Vec<Position>) -> Self {
        Self { path, valid: false }
    }
}

/// Traces the straight segment from `from` to `to`.
///
/// Diagonal and zero-length requests are invalid with an empty path. Otherwise
/// the walk stops, invalid, at the first step that leaves the grid or lands on
/// a wall; `path` then holds the cells traversed before that step.
pub fn segment(from: Position, to: Position, grid: &Grid) -> Segment {
    let Some(direction) = Direction::between(from, to) else {
        return Segment::invalid(Vec::new());
    };

    let mut path = Vec::with_capacity(from.manhattan_distance(to) as usize);
    let mut cursor = from;
    while cursor != to {
        cursor = direction.step(cursor);
        if !grid.is_floor(cursor) {
            return Segment::invalid(path);
        }
        path.push(cursor);
    }

    Segment { path, valid: true }
}

/// Full trace of a multi-segment shot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotPath {
    /// Concatenated cells of every fully valid segment, in travel order.
    pub path: Vec<Position>,
    pub valid: bool,
}

impl ShotPath {
    /// Returns true if this shot is valid and passes through `target`.
    ///
    /// Pure in `(self, target)`; re-evaluating against the same target always
    /// gives the same answer.
    pub fn hits(&self, target: Position) -> bool {
        self.valid && self.path.contains(&target)
    }
}

/// Traces `start → waypoints[0] → waypoints[1] → …`.
///
/// Invalid when there are no waypoints or any segment is invalid. On an
/// invalid segment, the path keeps only the segments before it.
pub fn full_path(start: Position, waypoints: &[Position], grid: &Grid) -> ShotPath {
    if waypoints.is_empty() {
        return ShotPath {
            path: Vec::new(),
            valid: false,
        };
    }

    let mut path = Vec::new();
    let mut cursor = start;
    for &waypoint in waypoints {
        let traced = segment(cursor, waypoint, grid);
        if !traced.valid {
            return ShotPath { path, valid: false };
        }
        path.extend(traced.path);
        cursor = waypoint;
    }

    ShotPath { path, valid: true }
}

/// Iterator over the floor cells a straight shot passes, starting one step
/// from the origin and ending before the first wall or grid edge.
#[derive(Clone, Debug)]
pub struct Ray<'a> {
    grid: &'a Grid,
    cursor: Position,
    direction: Direction,
}

impl Iterator for Ray<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.direction.step(self.cursor);
        if !self.grid.is_floor(next) {
            return None;
        }
        self.cursor = next;
        Some(next)
    }
}

/// Casts a ray from `from` in `direction`.
pub fn ray(from: Position, direction: Direction, grid: &Grid) -> Ray<'_> {
    Ray {
        grid,
        cursor: from,
        direction,
    }
}
