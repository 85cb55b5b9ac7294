//! Text rendering of runtime events for the terminal.

use game_core::{EngineEvent, GameOutcome};
use runtime::{Event, GameStateEvent, TurnEvent};

/// Renders one runtime event as zero or more lines of prose.
pub fn describe(event: &Event) -> Vec<String> {
    match event {
        Event::GameState(event) => describe_state(event),
        Event::Turn(turn) => describe_turn(turn),
    }
}

fn describe_state(event: &GameStateEvent) -> Vec<String> {
    match event {
        GameStateEvent::ActionResolved(resolution) => {
            if resolution.events.is_empty() {
                return vec![format!("{} stays", resolution.side)];
            }
            resolution.events.iter().filter_map(describe_engine).collect()
        }
        GameStateEvent::ActionRejected {
            side,
            code,
            severity,
            reason,
        } => {
            let hint = if severity.is_recoverable() {
                "; pick another action"
            } else {
                ""
            };
            vec![format!("{side} rejected [{code}]: {reason}{hint}")]
        }
        GameStateEvent::SessionReset {
            used_fallback,
            player,
            ai,
        } => {
            let mut lines = vec![format!("new session: player at {player}, ai at {ai}")];
            if *used_fallback {
                lines.push("grid fell back to a sparse layout".to_owned());
            }
            lines
        }
        GameStateEvent::GameOver { outcome } => vec![describe_outcome(outcome)],
    }
}

fn describe_engine(event: &EngineEvent) -> Option<String> {
    let line = match event {
        EngineEvent::MoveCompleted { side, from, to } => format!("{side} moves {from} -> {to}"),
        EngineEvent::MoveBlocked {
            side,
            target,
            reason,
        } => format!("{side} cannot reach {target}: {reason}"),
        EngineEvent::ShotResolved {
            side,
            path,
            valid,
            hit,
        } => {
            let result = match (*valid, *hit) {
                (_, true) => "hit",
                (true, false) => "miss",
                (false, false) => "blocked",
            };
            format!("{side} fires across {} cells: {result}", path.len())
        }
        EngineEvent::PowerupCollected { side, level, .. } => {
            format!("{side} picks up a powerup, weapon level {level}")
        }
        EngineEvent::PowerupSpawned { position } => format!("powerup appears at {position}"),
        // Reported through the dedicated runtime events.
        EngineEvent::TurnStarted { .. }
        | EngineEvent::GameOver { .. }
        | EngineEvent::SessionReset { .. } => return None,
    };
    Some(line)
}

fn describe_turn(turn: &TurnEvent) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let Some(position) = turn.spawned {
        lines.push(format!("powerup appears at {position}"));
    }
    lines.push(format!("turn {}: {} to act", turn.turn, turn.side));
    lines
}

pub fn describe_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Victory { winner, bends } => {
            format!("{winner} wins with a {bends}-bend shot")
        }
        GameOutcome::Aborted { reason } => format!("session aborted: {reason}"),
    }
}
