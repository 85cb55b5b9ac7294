use arrayvec::ArrayVec;

use super::MoveError;
use crate::env::Grid;
use crate::geometry::Direction;
use crate::state::Position;

/// Up to four single-step destinations.
pub type Moves = ArrayVec<Position, 4>;

/// Axis-adjacent floor cells around `unit` that the opponent does not hold.
pub fn valid_moves(unit: Position, opponent: Position, grid: &Grid) -> Moves {
    Direction::ALL
        .into_iter()
        .map(|direction| direction.step(unit))
        .filter(|&cell| grid.is_floor(cell) && cell != opponent)
        .collect()
}

/// Checks a single-step move from `from` to `to` against the opponent's
/// current cell.
///
/// Accepts exactly the targets [`valid_moves`] would list.
pub fn validate_move(
    from: Position,
    to: Position,
    opponent: Position,
    grid: &Grid,
) -> Result<(), MoveError> {
    if from.manhattan_distance(to) != 1 {
        return Err(MoveError::NotAdjacent { from, to });
    }
    if !grid.contains(to) {
        return Err(MoveError::OutOfBounds { destination: to });
    }
    if !grid.is_floor(to) {
        return Err(MoveError::Blocked { destination: to });
    }
    if to == opponent {
        return Err(MoveError::Occupied { destination: to });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_moves_skip_walls_edges_and_opponent() {
        let grid = Grid::from_rows(&["..#", "...", "..."]).unwrap();
        let moves = valid_moves(Position::new(1, 0), Position::new(1, 1), &grid);
        assert_eq!(moves.as_slice(), &[Position::new(0, 0)]);

        let open = valid_moves(Position::new(1, 1), Position::new(5, 5), &Grid::open(3));
        assert_eq!(open.len(), 4);
    }

    #[test]
    fn move_into_opponent_is_rejected() {
        let grid = Grid::open(20);
        let err = validate_move(Position::new(5, 5), Position::new(5, 6), Position::new(5, 6), &grid)
            .unwrap_err();
        assert_eq!(err, MoveError::Occupied { destination: Position::new(5, 6) });
    }

    #[test]
    fn validation_matches_listed_moves() {
        let grid = Grid::from_rows(&["....", ".#..", "....", "...."]).unwrap();
        let opponent = Position::new(2, 2);
        for from in grid.floor_cells() {
            let listed = valid_moves(from, opponent, &grid);
            for to in grid.positions() {
                let ok = validate_move(from, to, opponent, &grid).is_ok();
                assert_eq!(ok, listed.contains(&to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn reports_specific_reasons() {
        let grid = Grid::from_rows(&["..", "#."]).unwrap();
        let far = Position::new(5, 5);
        assert!(matches!(
            validate_move(Position::ORIGIN, Position::new(1, 1), far, &grid),
            Err(MoveError::NotAdjacent { .. })
        ));
        assert!(matches!(
            validate_move(Position::ORIGIN, Position::new(-1, 0), far, &grid),
            Err(MoveError::OutOfBounds { .. })
        ));
        assert!(matches!(
            validate_move(Position::ORIGIN, Position::new(0, 1), far, &grid),
            Err(MoveError::Blocked { .. })
        ));
    }
}
