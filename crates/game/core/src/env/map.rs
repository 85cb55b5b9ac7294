use std::collections::VecDeque;

use crate::state::Position;

/// Canonical terrain classes for battlefield cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Floor,
    Wall,
}

impl Cell {
    pub fn is_floor(self) -> bool {
        matches!(self, Cell::Floor)
    }
}

/// Square battlefield of floor and wall cells.
///
/// Cells are stored row-major (`y * size + x`). The grid is immutable once a
/// session starts; only the generator writes to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `cell`.
    pub fn filled(size: u32, cell: Cell) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![cell; len],
        }
    }

    /// Creates a wall-free grid.
    pub fn open(size: u32) -> Self {
        Self::filled(size, Cell::Floor)
    }

    /// Parses a square layout where `#` is a wall and any other byte is floor.
    ///
    /// Row `i` of `rows` becomes `y = i`. Returns `None` unless every row has
    /// exactly `rows.len()` cells.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.bytes())
            .map(|b| if b == b'#' { Cell::Wall } else { Cell::Floor })
            .collect();

        Some(Self {
            size: u32::try_from(size).ok()?,
            cells,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        let size = self.size as i32;
        position.x >= 0 && position.y >= 0 && position.x < size && position.y < size
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y as usize * self.size as usize + position.x as usize)
        } else {
            None
        }
    }

    /// Returns the cell at `position`, or `None` when off the grid.
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Returns true for on-grid floor cells.
    pub fn is_floor(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_floor)
    }

    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        if let Some(i) = self.index(position) {
            self.cells[i] = cell;
        }
    }

    /// Iterates every on-grid position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&p| self.is_floor(p))
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_floor()).count()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.len() - self.floor_count()
    }

    /// Axis-adjacent on-grid neighbours of `position`, regardless of terrain.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| position.offset(dx, dy))
            .filter(|&p| self.contains(p))
    }

    /// Number of floor cells reachable from `start` through adjacent floor steps.
    pub fn reachable_floor_count(&self, start: Position) -> usize {
        if !self.is_floor(start) {
            return 0;
        }

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        if let Some(i) = self.index(start) {
            visited[i] = true;
        }
        queue.push_back(start);
        let mut count = 0;

        while let Some(current) = queue.pop_front() {
            count += 1;
            for next in self.neighbors(current) {
                let Some(i) = self.index(next) else {
                    continue;
                };
                if !visited[i] && self.cells[i].is_floor() {
                    visited[i] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    /// Returns true if all floor cells form a single connected component.
    ///
    /// A grid with no floor at all is not connected.
    pub fn is_connected(&self) -> bool {
        match self.floor_cells().next() {
            Some(start) => self.reachable_floor_count(start) == self.floor_count(),
            None => false,
        }
    }

    /// Breadth-first search over cells (walls included) for the floor cell
    /// nearest to `origin`, skipping any position for which `exclude` is true.
    pub fn nearest_floor<F>(&self, origin: Position, exclude: F) -> Option<Position>
    where
        F: Fn(Position) -> bool,
    {
        if self.size == 0 {
            return None;
        }
        let origin = Position::new(
            origin.x.clamp(0, self.size as i32 - 1),
            origin.y.clamp(0, self.size as i32 - 1),
        );
        let start = self.index(origin)?;

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(origin);

        while let Some(current) = queue.pop_front() {
            if self.is_floor(current) && !exclude(current) {
                return Some(current);
            }
            for next in self.neighbors(current) {
                if let Some(i) = self.index(next)
                    && !visited[i]
                {
                    visited[i] = true;
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout_rows() {
        let grid = Grid::from_rows(&["..#", ".#.", "..."]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell(Position::new(2, 0)), Some(Cell::Wall));
        assert_eq!(grid.cell(Position::new(1, 1)), Some(Cell::Wall));
        assert!(grid.is_floor(Position::new(0, 2)));
        assert_eq!(grid.cell(Position::new(3, 0)), None);
        assert!(Grid::from_rows(&["..", "..."]).is_none());
    }

    #[test]
    fn detects_disconnected_floor() {
        let split = Grid::from_rows(&[".#.", ".#.", ".#."]).unwrap();
        assert!(!split.is_connected());
        assert_eq!(split.reachable_floor_count(Position::ORIGIN), 3);

        let joined = Grid::from_rows(&[".#.", "...", ".#."]).unwrap();
        assert!(joined.is_connected());
        assert!(!Grid::filled(4, Cell::Wall).is_connected());
    }

    #[test]
    fn nearest_floor_walks_through_walls() {
        let grid = Grid::from_rows(&["###", "###", "##."]).unwrap();
        assert_eq!(grid.nearest_floor(Position::ORIGIN, |_| false), Some(Position::new(2, 2)));
        assert_eq!(grid.nearest_floor(Position::ORIGIN, |p| p == Position::new(2, 2)), None);
    }
}
