//! Generates every action the planner will consider this turn.

use std::collections::HashSet;

use game_core::{Action, Direction, Position, ShotWaypoints, full_path, ray, valid_moves};
use tracing::debug;

use super::AiContext;

/// Deepest bend count the shot search explores, regardless of weapon level.
pub const AI_MAX_BEND_CHECK_DEPTH: usize = 2;

/// A concrete action together with where it leaves the acting unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub action: Action,
    /// Cell the acting unit occupies after the action resolves.
    pub predicted: Position,
    /// True if the action is a shot whose path crosses the opponent's cell.
    pub hits: bool,
}

impl Candidate {
    fn stay(at: Position) -> Self {
        Self {
            action: Action::Stay,
            predicted: at,
            hits: false,
        }
    }
}

/// One pending expansion of the shot search.
struct ShotFrontier {
    anchor: Position,
    waypoints: ShotWaypoints,
    heading: Option<Direction>,
}

/// Generates all candidate actions.
///
/// Candidates are `Stay`, every legal single step, and every valid shot plan
/// within the bend limit, whether or not it crosses the opponent.
pub struct ActionCandidateGenerator;

impl ActionCandidateGenerator {
    /// Generates all candidates with `Stay` first.
    ///
    /// Duplicate actions are removed, so each move target and each waypoint
    /// sequence appears once.
    pub fn generate(ctx: &AiContext) -> Vec<Candidate> {
        let origin = ctx.me.position;
        let mut candidates = vec![Candidate::stay(origin)];

        let mut seen_moves = HashSet::new();
        for target in valid_moves(origin, ctx.opponent.position, ctx.grid) {
            if seen_moves.insert(target) {
                candidates.push(Candidate {
                    action: Action::Move { target },
                    predicted: target,
                    hits: false,
                });
            }
        }
        let move_count = candidates.len() - 1;

        for waypoints in Self::shot_plans(ctx) {
            let path = full_path(origin, &waypoints, ctx.grid);
            if !path.valid {
                continue;
            }
            let hits = path.hits(ctx.opponent.position);
            candidates.push(Candidate {
                action: Action::Shoot { waypoints },
                predicted: origin,
                hits,
            });
        }

        debug!(
            moves = move_count,
            shots = candidates.len() - move_count - 1,
            "generated AI candidates"
        );

        candidates
    }

    /// Enumerates every waypoint sequence within the bend limit.
    ///
    /// Explores an explicit work list instead of recursing: from each anchor
    /// every direction except a reversal is walked cell by cell until a wall
    /// or the edge. Each cell passed ends one plan and may become the next
    /// anchor while the bend limit allows.
    pub fn shot_plans(ctx: &AiContext) -> Vec<ShotWaypoints> {
        let max_bends = ctx.me.bend_budget().min(AI_MAX_BEND_CHECK_DEPTH);

        let mut plans = Vec::new();
        let mut seen = HashSet::new();
        let mut work = vec![ShotFrontier {
            anchor: ctx.me.position,
            waypoints: ShotWaypoints::new(),
            heading: None,
        }];

        while let Some(frontier) = work.pop() {
            for direction in Direction::ALL {
                if frontier.heading == Some(direction.reverse()) {
                    continue;
                }

                for cell in ray(frontier.anchor, direction, ctx.grid) {
                    let mut waypoints = frontier.waypoints.clone();
                    if waypoints.try_push(cell).is_err() {
                        break;
                    }

                    if seen.insert(waypoints.clone()) {
                        plans.push(waypoints.clone());
                    }

                    // A waypoint list of length n uses n - 1 bends; one more
                    // anchor is allowed while that stays within the limit.
                    if waypoints.len() <= max_bends {
                        work.push(ShotFrontier {
                            anchor: cell,
                            waypoints,
                            heading: Some(direction),
                        });
                    }
                }
            }
        }

        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ActionKind, Grid, Side, Unit};

    fn units(me: Position, level: u8, opponent: Position) -> (Unit, Unit) {
        (
            Unit::new(Side::Ai, me).with_weapon_level(level),
            Unit::new(Side::Player, opponent),
        )
    }

    fn hitting(ctx: &AiContext, plans: &[ShotWaypoints]) -> usize {
        plans
            .iter()
            .filter(|plan| full_path(ctx.me.position, plan, ctx.grid).hits(ctx.opponent.position))
            .count()
    }

    #[test]
    fn level_one_walks_every_straight_line() {
        let grid = Grid::open(20);
        let (me, opponent) = units(Position::new(2, 2), 1, Position::new(2, 12));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let plans = ActionCandidateGenerator::shot_plans(&ctx);
        // 2 + 17 cells along each axis.
        assert_eq!(plans.len(), 38);
        assert!(plans.iter().all(|plan| plan.len() == 1));
        assert!(plans.iter().any(|plan| plan.as_slice() == [Position::new(2, 12)]));
        // Endpoints from (2, 12) to the far edge all cross the opponent.
        assert_eq!(hitting(&ctx, &plans), 8);
    }

    #[test]
    fn level_one_off_line_shots_never_bend_or_hit() {
        let grid = Grid::open(20);
        let (me, opponent) = units(Position::new(17, 17), 1, Position::new(2, 2));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let plans = ActionCandidateGenerator::shot_plans(&ctx);
        assert_eq!(plans.len(), 38);
        assert!(plans.iter().all(|plan| plan.len() == 1));
        assert_eq!(hitting(&ctx, &plans), 0);
    }

    #[test]
    fn bent_plans_respect_the_limit() {
        let grid = Grid::open(20);
        let (me, opponent) = units(Position::new(17, 17), 5, Position::new(2, 2));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let plans = ActionCandidateGenerator::shot_plans(&ctx);
        assert!(plans.iter().any(|p| p.as_slice() == [Position::new(17, 2), Position::new(2, 2)]));
        assert!(plans.iter().any(|p| p.as_slice() == [Position::new(2, 17), Position::new(2, 2)]));
        assert!(plans.iter().any(|p| p.as_slice() == [Position::new(17, 5)]));
        for plan in &plans {
            assert!(plan.len() <= AI_MAX_BEND_CHECK_DEPTH + 1);
            assert!(full_path(me.position, plan, &grid).valid);
        }

        let unique: HashSet<_> = plans.iter().collect();
        assert_eq!(unique.len(), plans.len());
    }

    #[test]
    fn walls_stop_the_search() {
        // Row index is y; a wall column at x = 5 separates the units.
        let grid = Grid::from_rows(&[
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
        ])
        .unwrap();
        let (me, opponent) = units(Position::new(1, 1), 5, Position::new(8, 8));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let plans = ActionCandidateGenerator::shot_plans(&ctx);
        assert!(!plans.is_empty());
        assert!(plans.iter().flatten().all(|cell| cell.x < 5));
        assert_eq!(hitting(&ctx, &plans), 0);
    }

    #[test]
    fn candidates_cover_stay_moves_and_shots() {
        let grid = Grid::open(20);
        let (me, opponent) = units(Position::new(5, 5), 1, Position::new(5, 6));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let candidates = ActionCandidateGenerator::generate(&ctx);
        assert_eq!(candidates[0].action, Action::Stay);

        let moves: Vec<_> = candidates
            .iter()
            .filter(|c| c.action.kind() == ActionKind::Move)
            .collect();
        // The opponent blocks the northern step.
        assert_eq!(moves.len(), 3);

        let shots: Vec<_> = candidates
            .iter()
            .filter(|c| c.action.kind() == ActionKind::Shoot)
            .collect();
        // 5 + 14 cells along each axis; the 14 cells north run through the opponent.
        assert_eq!(shots.len(), 38);
        assert_eq!(shots.iter().filter(|c| c.hits).count(), 14);
        assert!(shots.iter().all(|c| c.predicted == me.position));
    }
}
