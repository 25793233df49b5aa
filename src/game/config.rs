use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Speed at the start of every session, in ticks per second
    pub initial_speed: u32,
    /// Points awarded for each food eaten
    pub food_score: u32,
    /// Speed goes up by one each time the score reaches a multiple of this
    pub speed_up_every: u32,
    /// Name stored with every finished game
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_speed: 5,
            food_score: 10,
            speed_up_every: 50,
            player_name: "Player1".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn with_initial_speed(mut self, speed: u32) -> Self {
        self.initial_speed = speed.max(1);
        self
    }
}

/// Time between two simulation ticks at the given speed
pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(speed.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.initial_speed, 5);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.speed_up_every, 50);
        assert_eq!(config.player_name, "Player1");
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_player("ada");
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.player_name, "ada");
    }

    #[test]
    fn test_speed_never_zero() {
        let config = GameConfig::small().with_initial_speed(0);
        assert_eq!(config.initial_speed, 1);
    }

    #[test]
    fn test_tick_interval_shrinks_with_speed() {
        assert_eq!(tick_interval(5), Duration::from_millis(200));
        assert_eq!(tick_interval(10), Duration::from_millis(100));
        assert!(tick_interval(6) < tick_interval(5));
        assert_eq!(tick_interval(0), Duration::from_millis(1000));
    }
}
