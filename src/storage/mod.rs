//! Persistence of finished games
//!
//! Every game that ends in a collision becomes one append-only row. The
//! analytics view reads them back per player and as a global leaderboard.

pub mod record;
pub mod sqlite;

pub use record::{GameRecord, TopScore};
pub use sqlite::SqliteStatsStore;

use thiserror::Error;

/// Storage error wrapper.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only store of finished games
pub trait StatsStore {
    /// Store a finished game, returning its row id
    fn append(&mut self, record: &GameRecord) -> Result<i64, StorageError>;

    /// All games of one player, newest first
    fn query_by_player(&self, player_name: &str) -> Result<Vec<GameRecord>, StorageError>;

    /// Best scores across all players, highest first
    fn query_top_scores(&self, limit: usize) -> Result<Vec<TopScore>, StorageError>;
}
