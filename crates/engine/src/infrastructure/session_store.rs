//! SQLite-backed session storage.
//!
//! A plain key-value table: one JSON document per session under
//! `game_state:{fid}`.

use async_trait::async_trait;
use frame_survivor_domain::{SessionId, SessionRecord};
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, RepoError, SessionRepo};

/// Explore counter of a stored document of any shape, also under the legacy
/// `explore_times` key. Anything unreadable counts as 0.
pub(crate) fn lenient_explore_count(json: &str) -> u32 {
    let Ok(document) = serde_json::from_str::<Value>(json) else {
        return 0;
    };
    ["explore_count", "explore_times"]
        .into_iter()
        .find_map(|key| document.get(key))
        .and_then(|value| {
            value.as_u64().or_else(|| {
                value
                    .as_f64()
                    .filter(|count| count.is_finite() && *count >= 0.0)
                    .map(|count| count as u64)
            })
        })
        .map_or(0, |count| u32::try_from(count).unwrap_or(u32::MAX))
}

/// SQLite implementation of `SessionRepo`.
pub struct SqliteSessionRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteSessionRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("session_store", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS game_state (
                key TEXT PRIMARY KEY NOT NULL,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("session_store", e))?;

        Ok(Self { pool, clock })
    }

    async fn load_json(&self, id: SessionId) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT value_json FROM game_state WHERE key = ?")
            .bind(id.storage_key())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_session", e))?;

        Ok(row.map(|row| row.get::<String, _>("value_json")))
    }
}

#[async_trait]
impl SessionRepo for SqliteSessionRepo {
    async fn get(&self, id: SessionId) -> Result<Option<SessionRecord>, RepoError> {
        match self.load_json(id).await? {
            Some(json) => {
                let record = serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, id: SessionId, record: &SessionRecord) -> Result<(), RepoError> {
        let json = serde_json::to_string(record).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO game_state (key, value_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value_json = excluded.value_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id.storage_key())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("set_session", e))?;

        Ok(())
    }

    async fn explore_count_lenient(&self, id: SessionId) -> Result<u32, RepoError> {
        Ok(self
            .load_json(id)
            .await?
            .map_or(0, |json| lenient_explore_count(&json)))
    }
}
