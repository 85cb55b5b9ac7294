/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Edge length of the square battlefield.
    pub grid_size: u32,

    /// Fraction of cells the generator tries to turn into walls.
    pub wall_density: f64,

    /// Probability that an eligible turn hand-off spawns a powerup.
    pub powerup_spawn_chance: f64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Highest weapon level; a unit may bend its shot `level - 1` times.
    pub const MAX_LEVEL: usize = 5;
    /// Maximum number of uncollected powerups on the board.
    pub const MAX_POWERUPS: usize = 4;

    // ===== generation and economy limits =====
    pub const GENERATION_ATTEMPTS: usize = 10;
    /// Random cell draws allowed per generation pass, as a multiple of the wall target.
    pub const WALL_PLACEMENT_FACTOR: usize = 20;
    /// Chebyshev radius around each start corner where walls are discouraged.
    pub const CORNER_MARGIN: i32 = 2;
    pub const CORNER_WALL_CHANCE: f64 = 0.2;
    pub const FALLBACK_WALL_DENSITY: f64 = 0.05;
    /// Minimum start separation as a fraction of the grid size.
    pub const START_DISTANCE_RATIO: f64 = 0.6;
    pub const POWERUP_SPAWN_RETRIES: usize = 50;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: u32 = 20;
    pub const DEFAULT_WALL_DENSITY: f64 = 0.15;
    pub const DEFAULT_POWERUP_SPAWN_CHANCE: f64 = 0.6;

    pub fn new() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            wall_density: Self::DEFAULT_WALL_DENSITY,
            powerup_spawn_chance: Self::DEFAULT_POWERUP_SPAWN_CHANCE,
        }
    }

    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_wall_density(mut self, wall_density: f64) -> Self {
        self.wall_density = wall_density.clamp(0.0, 1.0);
        self
    }

    pub fn with_powerup_spawn_chance(mut self, chance: f64) -> Self {
        self.powerup_spawn_chance = chance.clamp(0.0, 1.0);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
