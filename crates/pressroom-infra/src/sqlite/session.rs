//! SQLite session id store.
//!
//! Implements `SessionStore` from `pressroom-core` using sqlx with split
//! read/write pools.

use chrono::Utc;
use sqlx::Row;

use pressroom_core::session_store::SessionStore;
use pressroom_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl SessionStore for SqliteSessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT session_id FROM session_keys WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| row.try_get::<String, _>("session_id"))
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn save(&self, key: &str, session_id: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO session_keys (key, session_id, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET
                   session_id = excluded.session_id,
                   updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(session_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::debug!(session_key = key, "session id saved");
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM session_keys WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }
}
