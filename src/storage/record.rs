use chrono::{DateTime, Utc};

/// One finished game, as stored in the `game_stats` table
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub player_name: String,
    pub score: u32,
    /// Seconds from session start to the fatal collision
    pub time_alive_secs: f64,
    pub max_speed: u32,
    pub food_eaten: u32,
    pub played_at: DateTime<Utc>,
    /// Direction commands issued during the session
    pub movements: u32,
    /// Food eaten per movement, as a percentage
    pub efficiency: f64,
}

/// A leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub struct TopScore {
    pub player_name: String,
    pub score: u32,
    pub time_alive_secs: f64,
}
