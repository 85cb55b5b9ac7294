//! Resolution of accepted actions.
//!
//! Everything here runs with the phase set to `Resolving`. Moves and shots are
//! re-checked against the opponent's position at this instant, not the one
//! seen when the action was authored.

use super::{EngineEvent, TurnEngine};
use crate::action::validate_move;
use crate::env::RngSource;
use crate::geometry::full_path;
use crate::powerup;
use crate::state::{GameOutcome, Phase, Position, Side};

impl<R: RngSource> TurnEngine<R> {
    pub(super) fn resolve_move(&mut self, side: Side, target: Position) -> Vec<EngineEvent> {
        let from = self.state.unit(side).position;
        let opponent = self.state.opponent(side).position;

        if let Err(reason) = validate_move(from, target, opponent, &self.state.grid) {
            return vec![EngineEvent::MoveBlocked {
                side,
                target,
                reason,
            }];
        }

        let mut events = Vec::with_capacity(2);
        self.state.unit_mut(side).position = target;
        events.push(EngineEvent::MoveCompleted {
            side,
            from,
            to: target,
        });

        let state = &mut self.state;
        if let Some(level) = powerup::collect(state.units.get_mut(side), &mut state.powerups, target)
        {
            events.push(EngineEvent::PowerupCollected {
                side,
                position: target,
                level,
            });
        }

        events
    }

    /// Traces the shot from the shooter's current cell and ends the game on a hit.
    pub(super) fn resolve_shot(&mut self, side: Side, waypoints: &[Position]) -> Vec<EngineEvent> {
        let origin = self.state.unit(side).position;
        let target = self.state.opponent(side).position;
        let shot = full_path(origin, waypoints, &self.state.grid);
        let hit = shot.hits(target);

        let mut events = vec![EngineEvent::ShotResolved {
            side,
            path: shot.path,
            valid: shot.valid,
            hit,
        }];

        if hit {
            let outcome = GameOutcome::Victory {
                winner: side,
                bends: waypoints.len().saturating_sub(1),
            };
            self.state.turn.phase = Phase::GameOver;
            self.state.outcome = Some(outcome.clone());
            events.push(EngineEvent::GameOver { outcome });
        }

        events
    }
}
