//! Weapon-upgrade pickups: spawning under a cap and collection on move.
use crate::config::GameConfig;
use crate::env::{Grid, RngSource};
use crate::state::{GameState, Phase, Position, Powerup, Powerups, Unit, Units};

/// Rolls for a powerup spawn at a turn hand-off.
///
/// Does nothing while the game is over, while an action is resolving, or when
/// the board already holds [`GameConfig::MAX_POWERUPS`]. Otherwise spawns with
/// probability `spawn_chance` and returns the new powerup's cell.
pub fn maybe_spawn<R>(state: &mut GameState, spawn_chance: f64, rng: &mut R) -> Option<Position>
where
    R: RngSource + ?Sized,
{
    if state.is_over() || state.phase() == Phase::Resolving || state.powerups.is_full() {
        return None;
    }
    if !rng.chance(spawn_chance) {
        return None;
    }
    spawn(&state.grid, &state.units, &mut state.powerups, rng)
}

/// Places one powerup on a random free floor cell.
///
/// Tries up to [`GameConfig::POWERUP_SPAWN_RETRIES`] uniformly random cells and
/// takes the first that is floor, holds no unit and holds no powerup. Returns
/// `None` when the board is full or no free cell turned up in time.
pub fn spawn<R>(grid: &Grid, units: &Units, powerups: &mut Powerups, rng: &mut R) -> Option<Position>
where
    R: RngSource + ?Sized,
{
    if powerups.is_full() {
        return None;
    }

    for _ in 0..GameConfig::POWERUP_SPAWN_RETRIES {
        let position = Position::new(
            rng.below(grid.size()) as i32,
            rng.below(grid.size()) as i32,
        );
        let free = grid.is_floor(position)
            && !units.occupies(position)
            && !powerups.iter().any(|p| p.position == position);
        if free {
            powerups.try_push(Powerup::new(position)).ok()?;
            return Some(position);
        }
    }

    None
}

/// Picks up the powerup at `position`, if any.
///
/// Removes it from the board and raises the unit's weapon level by one,
/// saturating at [`GameConfig::MAX_LEVEL`]. Returns the new level.
pub fn collect(unit: &mut Unit, powerups: &mut Powerups, position: Position) -> Option<u8> {
    let index = powerups.iter().position(|p| p.position == position)?;
    powerups.remove(index);
    Some(unit.upgrade_weapon())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};
    use crate::state::Side;

    fn open_state() -> GameState {
        GameState::new(Grid::open(10), Position::new(1, 1), Position::new(8, 8))
    }

    #[test]
    fn spawn_avoids_walls_units_and_other_powerups() {
        let grid = Grid::from_rows(&["#..", "#.#", "###"]).unwrap();
        let units = Units::new(Position::new(1, 0), Position::new(1, 1));
        let mut powerups = Powerups::new();
        let mut rng = ScriptedRng::new(vec![2, 0]);

        assert_eq!(spawn(&grid, &units, &mut powerups, &mut rng), Some(Position::new(2, 0)));
        // The only free floor cell is taken now.
        assert_eq!(spawn(&grid, &units, &mut powerups, &mut rng), None);
        assert_eq!(powerups.len(), 1);
    }

    #[test]
    fn maybe_spawn_never_exceeds_cap() {
        let mut state = open_state();
        let mut rng = PcgRng::new(9);
        for _ in 0..200 {
            maybe_spawn(&mut state, 1.0, &mut rng);
            assert!(state.powerups.len() <= GameConfig::MAX_POWERUPS);
        }
        assert_eq!(state.powerups.len(), GameConfig::MAX_POWERUPS);

        let mut always = ScriptedRng::constant_fraction(0.0);
        assert_eq!(maybe_spawn(&mut state, 1.0, &mut always), None);
        assert_eq!(state.powerups.len(), GameConfig::MAX_POWERUPS);
    }

    #[test]
    fn maybe_spawn_respects_phase_and_chance() {
        let mut state = open_state();
        // Draws: 0.49 for the first roll, then a near-zero roll and cell (4, 7).
        let mut rng = ScriptedRng::new(vec![u32::MAX / 2, 4, 4]);

        assert_eq!(maybe_spawn(&mut state, 0.4, &mut rng), None);

        state.turn.phase = Phase::Resolving;
        assert_eq!(maybe_spawn(&mut state, 1.0, &mut rng), None);

        state.turn.phase = Phase::GameOver;
        assert_eq!(maybe_spawn(&mut state, 1.0, &mut rng), None);
        assert!(state.powerups.is_empty());

        state.turn.phase = Phase::Planning;
        assert!(maybe_spawn(&mut state, 0.6, &mut rng).is_some());
    }

    #[test]
    fn collect_upgrades_and_removes() {
        let mut unit = Unit::new(Side::Player, Position::ORIGIN);
        let mut powerups = Powerups::new();
        powerups.push(Powerup::new(Position::new(2, 2)));
        powerups.push(Powerup::new(Position::new(3, 3)));

        assert_eq!(collect(&mut unit, &mut powerups, Position::new(5, 5)), None);
        assert_eq!(collect(&mut unit, &mut powerups, Position::new(3, 3)), Some(2));
        assert_eq!(powerups.len(), 1);
        assert_eq!(collect(&mut unit, &mut powerups, Position::new(3, 3)), None);
    }

    #[test]
    fn collect_saturates_at_max_level() {
        let mut unit = Unit::new(Side::Ai, Position::ORIGIN).with_weapon_level(5);
        let mut powerups = Powerups::new();
        powerups.push(Powerup::new(Position::ORIGIN));
        assert_eq!(collect(&mut unit, &mut powerups, Position::ORIGIN), Some(5));
        assert!(powerups.is_empty());
    }
}
