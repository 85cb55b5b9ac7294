//! Candidate selection for the heuristic planner.

use std::collections::HashMap;

use game_core::{Action, Grid, Powerup, RngSource, Unit};
use tracing::debug;

use super::AiContext;
use super::generator::{ActionCandidateGenerator, Candidate};
use super::scoring::{Score, finish, positional_terms};

/// Candidates scoring within this margin of the best count as a near tie.
pub const NEAR_TIE_MARGIN: f64 = 5.0;
/// Probability that a near tie replaces the current best.
pub const NEAR_TIE_SWAP_CHANCE: f64 = 0.6;

/// Picks one action per turn for a unit.
///
/// The planner is symmetric: it works for whichever side `me` belongs to.
pub struct AiPlanner;

impl AiPlanner {
    pub fn choose_action<R>(
        me: &Unit,
        opponent: &Unit,
        grid: &Grid,
        powerups: &[Powerup],
        rng: &mut R,
    ) -> Action
    where
        R: RngSource + ?Sized,
    {
        Self::choose(&AiContext::new(me, opponent, grid, powerups), rng)
    }

    /// Scores every candidate, then picks one with [`AiPlanner::select`].
    ///
    /// Draws one jitter value per candidate, in generation order, before any
    /// tie-break draw.
    pub fn choose<R>(ctx: &AiContext, rng: &mut R) -> Action
    where
        R: RngSource + ?Sized,
    {
        let candidates = ActionCandidateGenerator::generate(ctx);

        let mut by_cell = HashMap::new();
        let scored: Vec<_> = candidates
            .into_iter()
            .map(|candidate| {
                let is_move = matches!(candidate.action, Action::Move { .. });
                let base = *by_cell
                    .entry((candidate.predicted, is_move))
                    .or_insert_with(|| positional_terms(candidate.predicted, is_move, ctx));
                let breakdown = finish(&candidate, base, &mut *rng);
                (candidate, breakdown)
            })
            .collect();

        let Some((best, breakdown)) = Self::select(scored, rng) else {
            return Action::Stay;
        };

        debug!(
            side = %ctx.me.side,
            action = %best.action,
            score = breakdown.total(),
            ?breakdown,
            "AI chose action"
        );

        best.action
    }

    /// Walks scored candidates in order, keeping the best.
    ///
    /// The first entry (`Stay`) is the baseline. A strictly higher total
    /// always replaces the best. A total no lower than the best minus
    /// [`NEAR_TIE_MARGIN`] replaces it with probability
    /// [`NEAR_TIE_SWAP_CHANCE`], drawing once from `rng`.
    pub fn select<R, I>(scored: I, rng: &mut R) -> Option<(Candidate, Score)>
    where
        R: RngSource + ?Sized,
        I: IntoIterator<Item = (Candidate, Score)>,
    {
        let mut scored = scored.into_iter();
        let (mut best, mut best_score) = scored.next()?;

        for (candidate, breakdown) in scored {
            let value = breakdown.total();
            let best_total = best_score.total();
            let replace = if value > best_total {
                true
            } else if value >= best_total - NEAR_TIE_MARGIN {
                rng.chance(NEAR_TIE_SWAP_CHANCE)
            } else {
                false
            };

            if replace {
                best = candidate;
                best_score = breakdown;
            }
        }

        Some((best, best_score))
    }
}
