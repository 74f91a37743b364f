//! SQLite-backed repository for event rosters.

use sqlx::SqlitePool;
use swiss::Participant;

use crate::persistence::traits::RegistrationRepository;
use crate::persistence::{now_timestamp, StoreError};

/// SQLite implementation of [`RegistrationRepository`].
pub struct SqliteRegistrationRepository {
    pool: SqlitePool,
}

impl SqliteRegistrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RegistrationRepository for SqliteRegistrationRepository {
    async fn add(&self, event_id: i64, player_id: i64) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO registrations (event_id, player_id, registered_at) VALUES (?, ?, ?)",
        )
        .bind(event_id)
        .bind(player_id)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, event_id: i64, player_id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM registrations WHERE event_id = ? AND player_id = ?")
            .bind(event_id)
            .bind(player_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn roster(&self, event_id: i64) -> Result<Vec<Participant>, StoreError> {
        // rowid preserves insertion order even when two registrations land
        // in the same second.
        let rows: Vec<(i64, String)> = sqlx::query_as(
            r#"
            SELECT p.id, p.name
            FROM registrations r
            JOIN players p ON p.id = r.player_id
            WHERE r.event_id = ?
            ORDER BY r.rowid
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Participant { id, name })
            .collect())
    }

    async fn count(&self, event_id: i64) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
