//! Heuristic scoring of action candidates.
//!
//! Every candidate is judged by where it leaves the acting unit (its
//! *predicted* cell). The score is a sum of independent terms kept apart in
//! [`Score`]; the planner logs the winning breakdown.
//!
//! ```text
//! total = hit + powerup + threat + cover + approach + band + offence + jitter
//! ```

use game_core::{Action, Position, RngSource, line_offset};

use super::AiContext;
use super::generator::Candidate;

/// Base reward for a shot that lands.
pub const HIT_REWARD: f64 = 1200.0;
/// Deducted from [`HIT_REWARD`] per bend the shot uses.
pub const HIT_BEND_COST: f64 = 40.0;
/// Reward for stepping onto a powerup.
pub const POWERUP_PICKUP: f64 = 700.0;
/// Penalty when the opponent could hit the predicted cell.
pub const THREAT_PENALTY: f64 = 1000.0;
/// Extra penalty for walking into fire from a safe cell.
pub const NEW_EXPOSURE_PENALTY: f64 = 300.0;
/// Reward when the opponent has no straight line to the predicted cell.
pub const COVER_BONUS: f64 = 100.0;
/// Reward per step moved further off the opponent's row or column.
pub const LINE_OFFSET_STEP: f64 = 20.0;
/// Numerator of the powerup approach reward.
pub const APPROACH_SCALE: f64 = 150.0;
/// Distance below which the unit counts as too close.
pub const PREFERRED_MIN_DISTANCE: u32 = 5;
pub const TOO_CLOSE_STEP: f64 = 30.0;
pub const TOO_FAR_STEP: f64 = 10.0;
/// Reward for a cell from which the opponent can be hit next turn.
pub const OFFENCE_BONUS: f64 = 250.0;
pub const DIRECT_LINE_BONUS: f64 = 100.0;
pub const SAFE_STRIKE_BONUS: f64 = 150.0;
/// Half-width of the uniform tie-breaking noise.
pub const JITTER: f64 = 2.5;

/// Breakdown of a candidate's score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Score {
    pub hit: f64,
    pub powerup: f64,
    pub threat: f64,
    pub cover: f64,
    pub approach: f64,
    pub band: f64,
    pub offence: f64,
    pub jitter: f64,
}

impl Score {
    pub fn total(&self) -> f64 {
        self.hit
            + self.powerup
            + self.threat
            + self.cover
            + self.approach
            + self.band
            + self.offence
            + self.jitter
    }
}

/// Scores `candidate` against the snapshot in `ctx`.
///
/// Draws exactly one value from `rng` for the jitter term.
pub fn score<R>(candidate: &Candidate, ctx: &AiContext, rng: &mut R) -> Score
where
    R: RngSource + ?Sized,
{
    let is_move = matches!(candidate.action, Action::Move { .. });
    let base = positional_terms(candidate.predicted, is_move, ctx);
    finish(candidate, base, rng)
}

/// Terms that depend only on where the candidate leaves the unit and whether
/// it got there by moving.
///
/// Every shot and `Stay` share one predicted cell, so callers scoring many
/// candidates can compute this once per cell.
pub fn positional_terms(at: Position, is_move: bool, ctx: &AiContext) -> Score {
    let origin = ctx.me.position;
    let mut score = Score::default();

    if is_move && ctx.has_powerup_at(at) {
        score.powerup = POWERUP_PICKUP;
    }

    if ctx.opponent_threatens(at) {
        score.threat = -THREAT_PENALTY;
        if is_move && !ctx.opponent_threatens(origin) {
            score.threat -= NEW_EXPOSURE_PENALTY;
        }
    }

    if !ctx.opponent_has_direct_line(at) {
        score.cover = COVER_BONUS;
    }
    if is_move {
        let before = line_offset(ctx.opponent.position, origin);
        let after = line_offset(ctx.opponent.position, at);
        score.cover += LINE_OFFSET_STEP * f64::from(after.saturating_sub(before));
    }

    if is_move
        && let (Some(before), Some(after)) = (
            ctx.nearest_powerup_distance(origin),
            ctx.nearest_powerup_distance(at),
        )
        && after < before
    {
        score.approach = APPROACH_SCALE / f64::from(1 + after);
    }

    score.band = distance_band(at.manhattan_distance(ctx.opponent.position), ctx.grid_size());

    if ctx.can_strike_from(at, ctx.me.bend_budget()) {
        score.offence = OFFENCE_BONUS;
        if ctx.can_strike_from(at, 0) {
            score.offence += DIRECT_LINE_BONUS;
        }
        if !ctx.opponent_threatens(at) {
            score.offence += SAFE_STRIKE_BONUS;
        }
    }

    score
}

/// Adds the candidate's own terms to `base`: the hit reward and the jitter.
pub fn finish<R>(candidate: &Candidate, mut base: Score, rng: &mut R) -> Score
where
    R: RngSource + ?Sized,
{
    if candidate.hits {
        base.hit = HIT_REWARD - HIT_BEND_COST * candidate.action.bends() as f64;
        // A landed shot ends the game before the opponent can answer.
        base.threat = 0.0;
    }

    base.jitter = rng.range_f64(-JITTER, JITTER);
    base
}

/// Penalty for sitting outside the preferred distance band
/// `[PREFERRED_MIN_DISTANCE, grid_size / 2]`.
fn distance_band(distance: u32, grid_size: u32) -> f64 {
    let far_limit = grid_size / 2;
    if distance < PREFERRED_MIN_DISTANCE {
        -TOO_CLOSE_STEP * f64::from(PREFERRED_MIN_DISTANCE - distance)
    } else if distance > far_limit {
        -TOO_FAR_STEP * f64::from(distance - far_limit)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Grid, Position, Powerup, ScriptedRng, Side, Unit};

    // Mid-range raw value: range_f64 yields ~0 jitter.
    fn calm() -> ScriptedRng {
        ScriptedRng::constant_fraction(0.5)
    }

    fn moving(target: Position) -> Candidate {
        Candidate {
            action: Action::Move { target },
            predicted: target,
            hits: false,
        }
    }

    #[test]
    fn hit_reward_shrinks_with_bends() {
        let grid = Grid::open(20);
        let me = Unit::new(Side::Ai, Position::new(17, 17)).with_weapon_level(3);
        let opponent = Unit::new(Side::Player, Position::new(2, 2));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let straight = Candidate {
            action: Action::shoot(&[Position::new(2, 2)]).unwrap(),
            predicted: me.position,
            hits: true,
        };
        let bent = Candidate {
            action: Action::shoot(&[Position::new(17, 2), Position::new(2, 2)]).unwrap(),
            predicted: me.position,
            hits: true,
        };
        let straight = score(&straight, &ctx, &mut calm());
        let bent = score(&bent, &ctx, &mut calm());
        assert_eq!(straight.hit, HIT_REWARD);
        assert_eq!(bent.hit, HIT_REWARD - HIT_BEND_COST);
        assert_eq!(bent.threat, 0.0);
    }

    #[test]
    fn stepping_into_fire_is_penalised_twice() {
        let grid = Grid::open(20);
        let me = Unit::new(Side::Ai, Position::new(3, 10));
        let opponent = Unit::new(Side::Player, Position::new(2, 2));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let into_column = score(&moving(Position::new(2, 10)), &ctx, &mut calm());
        assert_eq!(into_column.threat, -(THREAT_PENALTY + NEW_EXPOSURE_PENALTY));
        assert_eq!(into_column.cover, 0.0);

        let away = score(&moving(Position::new(4, 10)), &ctx, &mut calm());
        assert_eq!(away.threat, 0.0);
        assert_eq!(away.cover, COVER_BONUS + LINE_OFFSET_STEP);
    }

    #[test]
    fn powerups_attract() {
        let grid = Grid::open(20);
        let me = Unit::new(Side::Ai, Position::new(10, 10));
        let opponent = Unit::new(Side::Player, Position::new(2, 2));
        let powerups = [Powerup::new(Position::new(11, 10)), Powerup::new(Position::new(10, 14))];
        let ctx = AiContext::new(&me, &opponent, &grid, &powerups);

        let pickup = score(&moving(Position::new(11, 10)), &ctx, &mut calm());
        assert_eq!(pickup.powerup, POWERUP_PICKUP);
        assert_eq!(pickup.approach, APPROACH_SCALE);

        let toward_second = score(&moving(Position::new(10, 11)), &ctx, &mut calm());
        assert_eq!(toward_second.powerup, 0.0);
        // Moving away from the closest powerup earns nothing.
        assert_eq!(toward_second.approach, 0.0);
    }

    #[test]
    fn distance_band_penalises_both_ends() {
        assert_eq!(distance_band(2, 20), -90.0);
        assert_eq!(distance_band(7, 20), 0.0);
        assert_eq!(distance_band(13, 20), -30.0);
    }

    #[test]
    fn offence_rewards_safe_direct_lines() {
        let grid = Grid::open(20);
        // Opponent at level 1 can only fire straight; AI at level 2 can bend.
        let me = Unit::new(Side::Ai, Position::new(8, 9)).with_weapon_level(2);
        let opponent = Unit::new(Side::Player, Position::new(2, 2));
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let stay = Candidate {
            action: Action::Stay,
            predicted: me.position,
            hits: false,
        };
        let scored = score(&stay, &ctx, &mut calm());
        assert_eq!(scored.offence, OFFENCE_BONUS + SAFE_STRIKE_BONUS);
        assert!(scored.jitter.abs() < 0.01);
    }

    #[test]
    fn shots_share_the_stay_terms() {
        let grid = Grid::open(20);
        let me = Unit::new(Side::Ai, Position::new(2, 10));
        let opponent = Unit::new(Side::Player, Position::new(2, 2)).with_weapon_level(2);
        let ctx = AiContext::new(&me, &opponent, &grid, &[]);

        let base = positional_terms(me.position, false, &ctx);
        assert_eq!(base.threat, -THREAT_PENALTY);

        let miss = Candidate {
            action: Action::shoot(&[Position::new(2, 15)]).unwrap(),
            predicted: me.position,
            hits: false,
        };
        assert_eq!(finish(&miss, base, &mut calm()), score(&miss, &ctx, &mut calm()));

        let hit = Candidate {
            action: Action::shoot(&[Position::new(2, 2)]).unwrap(),
            predicted: me.position,
            hits: true,
        };
        let landed = finish(&hit, base, &mut calm());
        assert_eq!(landed.threat, 0.0);
        assert_eq!(landed.hit, HIT_REWARD);
        assert_eq!(landed.cover, base.cover);
    }
}
