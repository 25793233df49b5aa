use rusqlite::{Connection, Row, params};
use std::path::Path;

use super::{GameRecord, StatsStore, StorageError, TopScore};

/// SQLite-backed [`StatsStore`] with a single `game_stats` table
pub struct SqliteStatsStore {
    conn: Connection,
}

impl SqliteStatsStore {
    /// Open or create a database at the provided path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "create table if not exists game_stats (
                id integer primary key autoincrement,
                player_name text not null,
                score integer not null,
                time_alive real not null,
                max_speed integer not null,
                food_eaten integer not null,
                game_date text not null,
                movements integer not null,
                efficiency real not null
            )",
            [],
        )?;
        Ok(())
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<GameRecord> {
        Ok(GameRecord {
            player_name: row.get(0)?,
            score: row.get(1)?,
            time_alive_secs: row.get(2)?,
            max_speed: row.get(3)?,
            food_eaten: row.get(4)?,
            played_at: row.get(5)?,
            movements: row.get(6)?,
            efficiency: row.get(7)?,
        })
    }
}

impl StatsStore for SqliteStatsStore {
    fn append(&mut self, record: &GameRecord) -> Result<i64, StorageError> {
        self.conn.execute(
            "insert into game_stats
                (player_name, score, time_alive, max_speed, food_eaten, game_date, movements, efficiency)
             values (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                record.player_name,
                record.score,
                record.time_alive_secs,
                record.max_speed,
                record.food_eaten,
                record.played_at,
                record.movements,
                record.efficiency,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn query_by_player(&self, player_name: &str) -> Result<Vec<GameRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "select player_name, score, time_alive, max_speed, food_eaten, game_date, movements, efficiency
             from game_stats
             where player_name = ?
             order by game_date desc, id desc",
        )?;
        let records = stmt
            .query_map(params![player_name], Self::record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn query_top_scores(&self, limit: usize) -> Result<Vec<TopScore>, StorageError> {
        let mut stmt = self.conn.prepare(
            "select player_name, score, time_alive
             from game_stats
             order by score desc, id asc
             limit ?",
        )?;
        let mut rows = stmt.query(params![limit as i64])?;
        let mut scores = Vec::with_capacity(limit.min(16));
        while let Some(row) = rows.next()? {
            scores.push(TopScore {
                player_name: row.get(0)?,
                score: row.get(1)?,
                time_alive_secs: row.get(2)?,
            });
        }
        Ok(scores)
    }
}
