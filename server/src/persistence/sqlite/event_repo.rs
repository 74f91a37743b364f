//! SQLite-backed repository for events.

use sqlx::SqlitePool;

use crate::persistence::traits::EventRepository;
use crate::persistence::{now_timestamp, EventRecord, StoreError};

/// Row type for event queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    name: String,
    event_date: Option<String>,
    created_at: i64,
}

impl From<EventRow> for EventRecord {
    fn from(r: EventRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            event_date: r.event_date,
            created_at: r.created_at,
        }
    }
}

/// SQLite implementation of [`EventRepository`].
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, name: &str, event_date: Option<&str>) -> Result<EventRecord, StoreError> {
        let created_at = now_timestamp();
        let result =
            sqlx::query("INSERT INTO events (name, event_date, created_at) VALUES (?, ?, ?)")
                .bind(name)
                .bind(event_date)
                .bind(created_at)
                .execute(&self.pool)
                .await?;

        Ok(EventRecord {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            event_date: event_date.map(str::to_string),
            created_at,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<EventRecord>, StoreError> {
        let row: Option<EventRow> =
            sqlx::query_as("SELECT id, name, event_date, created_at FROM events WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(EventRecord::from))
    }

    async fn list(&self) -> Result<Vec<EventRecord>, StoreError> {
        let rows: Vec<EventRow> =
            sqlx::query_as("SELECT id, name, event_date, created_at FROM events ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM events").execute(&self.pool).await?;
        Ok(())
    }
}
