//! SQLite-backed score store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::traits::ScoreStore;
use crate::types::ScoreEntry;

use super::schema::DDL;

/// SQLite-backed score store.
#[derive(Clone)]
pub struct SqliteScoreStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteScoreStore {
    /// Open a file-backed store, creating the schema if needed.
    pub fn open(path: &Path) -> StatsResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StatsError::Store {
                message: format!("failed to create store directory {}: {}", parent.display(), e),
            })?;
        }
        let conn = Connection::open(path)?;
        Self::init_connection(&conn)?;
        debug!(path = %path.display(), "opened score store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store.
    pub fn memory() -> StatsResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_connection(conn: &Connection) -> StatsResult<()> {
        // WAL mode for file-backed DBs (no-op for in-memory)
        let _ = conn.execute_batch("PRAGMA journal_mode = WAL");
        conn.execute_batch(DDL)?;
        Ok(())
    }

    fn lock(&self) -> StatsResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StatsError::Store {
            message: "score store connection poisoned".to_string(),
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> StatsResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM holder_scores", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> StatsResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All entries, sorted by address.
    pub fn list(&self) -> StatsResult<Vec<ScoreEntry>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT address, score, updated_at FROM holder_scores ORDER BY address ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(address, score, updated_at)| row_to_entry(address, score, &updated_at))
            .collect()
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn row_to_entry(address: String, score: f64, updated_at: &str) -> StatsResult<ScoreEntry> {
    let updated_at = DateTime::parse_from_rfc3339(updated_at)
        .map_err(|e| StatsError::Store {
            message: format!("invalid updated_at for {}: {}", address, e),
        })?
        .with_timezone(&Utc);
    Ok(ScoreEntry {
        address,
        score,
        updated_at,
    })
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn get(&self, address: &str) -> StatsResult<ScoreEntry> {
        let conn = self.lock()?;
        let row: Option<(f64, String)> = conn
            .query_row(
                "SELECT score, updated_at FROM holder_scores WHERE address = ?1",
                params![address],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((score, updated_at)) => row_to_entry(address.to_string(), score, &updated_at),
            None => Err(StatsError::HolderNotFound {
                address: address.to_string(),
            }),
        }
    }

    async fn insert(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry> {
        let conn = self.lock()?;
        // Upsert: a concurrent resolution may have inserted the same holder
        // since our lookup; the later write wins.
        conn.execute(
            "INSERT INTO holder_scores(address, score, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(address) DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at",
            params![entry.address, entry.score, format_timestamp(&entry.updated_at)],
        )?;
        Ok(entry)
    }

    async fn update(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE holder_scores SET score = ?1, updated_at = ?2 WHERE address = ?3",
            params![entry.score, format_timestamp(&entry.updated_at), entry.address],
        )?;
        if changed == 0 {
            return Err(StatsError::HolderNotFound {
                address: entry.address,
            });
        }
        Ok(entry)
    }
}
