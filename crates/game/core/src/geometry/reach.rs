use std::collections::VecDeque;

use super::{Direction, ray};
use crate::env::Grid;
use crate::state::Position;

/// Search node: a cell entered while travelling in `direction`, after
/// spending `bends` direction changes.
#[derive(Clone, Copy, Debug)]
struct RayState {
    position: Position,
    direction: Direction,
    bends: usize,
}

/// Returns true if a bent orthogonal shot with at most `bend_budget`
/// direction changes can travel from `attacker` to `target` without crossing
/// a wall.
///
/// Breadth-first over `(cell, direction)` states: continuing straight is free,
/// turning costs one bend and doubling back is not allowed. States are
/// enqueued in non-decreasing bend order, so the first visit of a state is its
/// cheapest. Occupancy is never considered.
pub fn reachable(attacker: Position, target: Position, grid: &Grid, bend_budget: usize) -> bool {
    if attacker == target {
        return true;
    }

    let size = grid.size() as usize;
    let mut visited = vec![[false; 4]; size * size];
    let slot = |position: Position| position.y as usize * size + position.x as usize;
    let mut queue = VecDeque::new();

    for direction in Direction::ALL {
        for position in ray(attacker, direction, grid) {
            if position == target {
                return true;
            }
            let seen = &mut visited[slot(position)][direction.index()];
            if !*seen {
                *seen = true;
                queue.push_back(RayState {
                    position,
                    direction,
                    bends: 0,
                });
            }
        }
    }

    while let Some(state) = queue.pop_front() {
        if state.bends >= bend_budget {
            continue;
        }

        for direction in Direction::ALL {
            if direction == state.direction || direction == state.direction.reverse() {
                continue;
            }
            for position in ray(state.position, direction, grid) {
                if position == target {
                    return true;
                }
                let seen = &mut visited[slot(position)][direction.index()];
                if *seen {
                    // Every later cell on this ray was reached at least as cheaply.
                    break;
                }
                *seen = true;
                queue.push_back(RayState {
                    position,
                    direction,
                    bends: state.bends + 1,
                });
            }
        }
    }

    false
}
