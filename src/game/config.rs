use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest grid the terminal board can draw
pub const MAX_GRID_SIZE: usize = 64;

/// Shortest snake a game may start with
pub const MIN_SNAKE_LENGTH: usize = 3;

/// Fixed rules of a game: board size, pace and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Size of one cell on the drawing surface, in pixels
    pub cell_size: u32,
    /// Time between two simulation ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per fruit
    pub fruit_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            cell_size: 40,
            tick_interval_ms: 350,
            initial_snake_length: 3,
            fruit_reward: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Width and height of the drawing surface in pixels
    pub fn surface_size(&self) -> u32 {
        self.grid_size as u32 * self.cell_size
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.fruit_reward, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(350));
        assert_eq!(config.surface_size(), 320);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.cell_count(), 225);
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
