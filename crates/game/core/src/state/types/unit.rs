use arrayvec::ArrayVec;

use super::{Position, Side};
use crate::config::GameConfig;

/// One combatant on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub side: Side,
    pub position: Position,
    /// Current weapon level in `1..=MAX_LEVEL`; only ever raised.
    pub weapon_level: u8,
}

impl Unit {
    pub const STARTING_LEVEL: u8 = 1;

    pub fn new(side: Side, position: Position) -> Self {
        Self {
            side,
            position,
            weapon_level: Self::STARTING_LEVEL,
        }
    }

    pub fn with_weapon_level(mut self, level: u8) -> Self {
        self.weapon_level = level.clamp(1, GameConfig::MAX_LEVEL as u8);
        self
    }

    /// Maximum number of direction changes this unit's shot may use.
    #[inline]
    pub fn bend_budget(&self) -> usize {
        usize::from(self.weapon_level.saturating_sub(1))
    }

    /// Raises the weapon level by one, saturating at `MAX_LEVEL`.
    ///
    /// Returns the resulting level.
    pub fn upgrade_weapon(&mut self) -> u8 {
        if usize::from(self.weapon_level) < GameConfig::MAX_LEVEL {
            self.weapon_level += 1;
        }
        self.weapon_level
    }
}

/// The pair of units alive in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Units {
    pub player: Unit,
    pub ai: Unit,
}

impl Units {
    pub fn new(player_start: Position, ai_start: Position) -> Self {
        Self {
            player: Unit::new(Side::Player, player_start),
            ai: Unit::new(Side::Ai, ai_start),
        }
    }

    pub fn get(&self, side: Side) -> &Unit {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Unit {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    /// Returns true if either unit stands on `position`.
    pub fn occupies(&self, position: Position) -> bool {
        self.player.position == position || self.ai.position == position
    }
}

/// An uncollected weapon upgrade lying on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Powerup {
    pub position: Position,
}

impl Powerup {
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Bounded set of powerups currently on the board.
pub type Powerups = ArrayVec<Powerup, { GameConfig::MAX_POWERUPS }>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_level_saturates_at_max() {
        let mut unit = Unit::new(Side::Player, Position::ORIGIN);
        for _ in 0..20 {
            let before = unit.weapon_level;
            let after = unit.upgrade_weapon();
            assert!(after >= before);
        }
        assert_eq!(usize::from(unit.weapon_level), GameConfig::MAX_LEVEL);
        assert_eq!(unit.bend_budget(), GameConfig::MAX_LEVEL - 1);
    }

    #[test]
    fn level_override_is_clamped() {
        let unit = Unit::new(Side::Ai, Position::ORIGIN).with_weapon_level(0);
        assert_eq!(unit.weapon_level, 1);
        let unit = unit.with_weapon_level(42);
        assert_eq!(usize::from(unit.weapon_level), GameConfig::MAX_LEVEL);
    }
}
