//! SQLite-backed repository for registered players.

use sqlx::SqlitePool;

use crate::persistence::traits::PlayerRepository;
use crate::persistence::{now_timestamp, PlayerRecord, StoreError};

/// Row type for player queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    created_at: i64,
}

impl From<PlayerRow> for PlayerRecord {
    fn from(r: PlayerRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}

/// SQLite implementation of [`PlayerRepository`].
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PlayerRepository for SqlitePlayerRepository {
    async fn create(&self, name: &str) -> Result<PlayerRecord, StoreError> {
        let created_at = now_timestamp();
        let result = sqlx::query("INSERT INTO players (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

        Ok(PlayerRecord {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at,
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError> {
        let row: Option<PlayerRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM players WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PlayerRecord::from))
    }

    async fn get(&self, id: i64) -> Result<Option<PlayerRecord>, StoreError> {
        let row: Option<PlayerRow> =
            sqlx::query_as("SELECT id, name, created_at FROM players WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(PlayerRecord::from))
    }

    async fn list(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let rows: Vec<PlayerRow> =
            sqlx::query_as("SELECT id, name, created_at FROM players ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(PlayerRecord::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM players").execute(&self.pool).await?;
        Ok(())
    }
}
