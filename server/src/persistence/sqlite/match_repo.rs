//! SQLite-backed repository for recorded match results.

use sqlx::SqlitePool;
use swiss::MatchRecord;

use crate::persistence::traits::MatchRepository;
use crate::persistence::{now_timestamp, StoreError};

/// Row type for match queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct MatchRow {
    round: i64,
    player_one: i64,
    player_two: i64,
    score_one: f64,
    score_two: f64,
}

impl From<MatchRow> for MatchRecord {
    fn from(r: MatchRow) -> Self {
        Self {
            round: r.round as u32,
            player_one: r.player_one,
            player_two: r.player_two,
            score_one: r.score_one,
            score_two: r.score_two,
        }
    }
}

/// SQLite implementation of [`MatchRepository`].
pub struct SqliteMatchRepository {
    pool: SqlitePool,
}

impl SqliteMatchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl MatchRepository for SqliteMatchRepository {
    async fn record(&self, event_id: i64, record: &MatchRecord) -> Result<(), StoreError> {
        let round = record.round as i64;
        sqlx::query(
            r#"
            INSERT INTO matches
                (event_id, round, player_one, player_two, score_one, score_two, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event_id)
        .bind(round)
        .bind(record.player_one)
        .bind(record.player_two)
        .bind(record.score_one)
        .bind(record.score_two)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_event(&self, event_id: i64) -> Result<Vec<MatchRecord>, StoreError> {
        let rows: Vec<MatchRow> = sqlx::query_as(
            r#"
            SELECT round, player_one, player_two, score_one, score_two
            FROM matches
            WHERE event_id = ?
            ORDER BY id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchRecord::from).collect())
    }

    async fn delete_for_event(&self, event_id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM matches WHERE event_id = ?")
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM matches").execute(&self.pool).await?;
        Ok(())
    }
}
