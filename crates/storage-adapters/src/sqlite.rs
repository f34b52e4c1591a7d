//! # SqliteThreadRepository
//!
//! Durable `ThreadRepository` on SQLite. Each thread is one row holding the
//! whole thread (replies included) as a JSON document; `board` and
//! `bumped_on` are copied into indexed columns for the listing query.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domains::{BoardError, Result, Thread, ThreadId, ThreadRepository};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::info;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS threads (
    id        TEXT PRIMARY KEY NOT NULL,
    board     TEXT NOT NULL,
    bumped_on TEXT NOT NULL,
    document  TEXT NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_threads_board_bumped ON threads (board, bumped_on DESC)";

pub struct SqliteThreadRepository {
    pool: SqlitePool,
}

/// Fixed-width UTC timestamps sort lexicographically in time order.
fn sort_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode(thread: &Thread) -> Result<String> {
    serde_json::to_string(thread).map_err(BoardError::storage)
}

fn decode(row: &SqliteRow) -> Result<Thread> {
    let document: String = row.try_get("document").map_err(BoardError::storage)?;
    serde_json::from_str(&document).map_err(BoardError::storage)
}

impl SqliteThreadRepository {
    /// Opens (creating if needed) the database at `url` and ensures the schema.
    ///
    /// An in-memory database lives only as long as its connection, so the pool
    /// is pinned to one connection that never expires.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(BoardError::storage)?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { max_connections });
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(BoardError::storage)?;

        let repo = Self { pool };
        repo.migrate().await?;
        info!(in_memory, "sqlite thread store ready");
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_TABLE, CREATE_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(BoardError::storage)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ThreadRepository for SqliteThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        sqlx::query("INSERT INTO threads (id, board, bumped_on, document) VALUES (?1, ?2, ?3, ?4)")
            .bind(thread.id.to_string())
            .bind(thread.board.as_str())
            .bind(sort_key(thread.bumped_on))
            .bind(encode(thread)?)
            .execute(&self.pool)
            .await
            .map_err(BoardError::storage)?;
        Ok(())
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        let result = sqlx::query("UPDATE threads SET bumped_on = ?1, document = ?2 WHERE id = ?3")
            .bind(sort_key(thread.bumped_on))
            .bind(encode(thread)?)
            .bind(thread.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(BoardError::storage)?;

        if result.rows_affected() == 0 {
            return Err(BoardError::thread_not_found(thread.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>> {
        sqlx::query("SELECT document FROM threads WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(BoardError::storage)?
            .as_ref()
            .map(decode)
            .transpose()
    }

    async fn find_in_board(&self, id: ThreadId, board: &str) -> Result<Option<Thread>> {
        sqlx::query("SELECT document FROM threads WHERE id = ?1 AND board = ?2")
            .bind(id.to_string())
            .bind(board)
            .fetch_optional(&self.pool)
            .await
            .map_err(BoardError::storage)?
            .as_ref()
            .map(decode)
            .transpose()
    }

    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        sqlx::query(
            "SELECT document FROM threads WHERE board = ?1 ORDER BY bumped_on DESC, rowid ASC LIMIT ?2",
        )
        .bind(board)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(BoardError::storage)?
        .iter()
        .map(decode)
        .collect()
    }

    async fn list_all(&self) -> Result<Vec<Thread>> {
        sqlx::query("SELECT document FROM threads ORDER BY rowid ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(BoardError::storage)?
            .iter()
            .map(decode)
            .collect()
    }

    async fn delete(&self, id: ThreadId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM threads WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(BoardError::storage)?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
