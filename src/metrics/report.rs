//! Data behind the analytics view
//!
//! Pulls a player's recent games and the global leaderboard out of a
//! [`StatsStore`] and shapes them into the series the charts draw.

use thiserror::Error;

use crate::storage::{GameRecord, StatsStore, StorageError, TopScore};

/// Games shown in the trend panels
pub const RECENT_GAMES: usize = 10;
/// Rows in the leaderboard panel
pub const LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No game data found for {0}")]
    NoData(String),
    #[error("Error loading analytics: {0}")]
    Storage(#[from] StorageError),
}

/// Recent history for one player plus the global top scores
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub player_name: String,
    /// Oldest first
    pub recent: Vec<GameRecord>,
    /// Highest first
    pub leaders: Vec<TopScore>,
}

impl AnalyticsReport {
    pub fn load(store: &dyn StatsStore, player_name: &str) -> Result<Self, ReportError> {
        let history = store.query_by_player(player_name)?;
        if history.is_empty() {
            return Err(ReportError::NoData(player_name.to_string()));
        }

        // History comes newest first; keep the newest ten and flip them
        let mut recent: Vec<GameRecord> = history.into_iter().take(RECENT_GAMES).collect();
        recent.reverse();

        let leaders = store.query_top_scores(LEADERBOARD_SIZE)?;

        Ok(Self {
            player_name: player_name.to_string(),
            recent,
            leaders,
        })
    }

    /// `(game number, score)` points
    pub fn score_series(&self) -> Vec<(f64, f64)> {
        self.series(|record| f64::from(record.score))
    }

    /// `(game number, seconds alive)` points
    pub fn survival_series(&self) -> Vec<(f64, f64)> {
        self.series(|record| record.time_alive_secs)
    }

    pub fn efficiencies(&self) -> Vec<f64> {
        self.recent.iter().map(|record| record.efficiency).collect()
    }

    pub fn max_score(&self) -> f64 {
        self.recent
            .iter()
            .map(|record| f64::from(record.score))
            .fold(0.0, f64::max)
    }

    pub fn max_survival(&self) -> f64 {
        self.recent
            .iter()
            .map(|record| record.time_alive_secs)
            .fold(0.0, f64::max)
    }

    fn series(&self, value: impl Fn(&GameRecord) -> f64) -> Vec<(f64, f64)> {
        self.recent
            .iter()
            .enumerate()
            .map(|(i, record)| (i as f64, value(record)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStatsStore;
    use chrono::{Duration, TimeZone, Utc};

    fn record(player: &str, score: u32, minutes: i64) -> GameRecord {
        GameRecord {
            player_name: player.to_string(),
            score,
            time_alive_secs: f64::from(score) / 2.0,
            max_speed: 5,
            food_eaten: score / 10,
            played_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
            movements: 10,
            efficiency: f64::from(score / 10) * 10.0,
        }
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let store = SqliteStatsStore::open_in_memory().unwrap();
        let err = AnalyticsReport::load(&store, "Player1").unwrap_err();
        assert!(matches!(err, ReportError::NoData(_)));
        assert_eq!(err.to_string(), "No game data found for Player1");
    }

    #[test]
    fn test_keeps_newest_ten_oldest_first() {
        let mut store = SqliteStatsStore::open_in_memory().unwrap();
        for i in 0..14u32 {
            store.append(&record("ann", i * 10, i64::from(i))).unwrap();
        }
        store.append(&record("bob", 500, 99)).unwrap();

        let report = AnalyticsReport::load(&store, "ann").unwrap();
        let scores: Vec<u32> = report.recent.iter().map(|r| r.score).collect();
        assert_eq!(scores, (4..14).map(|i| i * 10).collect::<Vec<_>>());

        assert_eq!(report.leaders.len(), LEADERBOARD_SIZE);
        assert_eq!(report.leaders[0].player_name, "bob");
        assert_eq!(report.leaders[1].score, 130);
    }

    #[test]
    fn test_series_shapes() {
        let mut store = SqliteStatsStore::open_in_memory().unwrap();
        store.append(&record("ann", 20, 0)).unwrap();
        store.append(&record("ann", 60, 1)).unwrap();

        let report = AnalyticsReport::load(&store, "ann").unwrap();
        assert_eq!(report.score_series(), vec![(0.0, 20.0), (1.0, 60.0)]);
        assert_eq!(report.survival_series(), vec![(0.0, 10.0), (1.0, 30.0)]);
        assert_eq!(report.efficiencies(), vec![20.0, 60.0]);
        assert_eq!(report.max_score(), 60.0);
        assert_eq!(report.max_survival(), 30.0);
    }
}
