//! Async repository trait definitions for the persistence layer.
//!
//! Each trait abstracts over one aggregate of the tournament store, so the
//! manager stays generic over the backend and tests can exercise it against
//! an in-memory database.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` — required by `tokio::spawn`.

use std::future::Future;

use swiss::{MatchRecord, Participant};

use super::{EventRecord, PlayerRecord, StoreError};

/// Repository for globally registered players.
pub trait PlayerRepository: Send + Sync {
    /// Insert a new player and return the stored row with its assigned id.
    fn create(&self, name: &str)
        -> impl Future<Output = Result<PlayerRecord, StoreError>> + Send;
    /// First player with this exact name, lowest id wins. Used for the
    /// reserved bye name lookup.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<PlayerRecord>, StoreError>> + Send;
    fn get(&self, id: i64)
        -> impl Future<Output = Result<Option<PlayerRecord>, StoreError>> + Send;
    fn list(&self) -> impl Future<Output = Result<Vec<PlayerRecord>, StoreError>> + Send;
    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send;
    fn delete_all(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Repository for events.
pub trait EventRepository: Send + Sync {
    fn create(
        &self,
        name: &str,
        event_date: Option<&str>,
    ) -> impl Future<Output = Result<EventRecord, StoreError>> + Send;
    fn get(&self, id: i64)
        -> impl Future<Output = Result<Option<EventRecord>, StoreError>> + Send;
    fn list(&self) -> impl Future<Output = Result<Vec<EventRecord>, StoreError>> + Send;
    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send;
    /// Remove an event and, via cascade, its registrations and matches.
    /// Players are never deleted this way.
    fn delete(&self, id: i64) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn delete_all(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Repository for event rosters (player-in-event links).
pub trait RegistrationRepository: Send + Sync {
    fn add(
        &self,
        event_id: i64,
        player_id: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn remove(
        &self,
        event_id: i64,
        player_id: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// The event's roster in registration order.
    fn roster(
        &self,
        event_id: i64,
    ) -> impl Future<Output = Result<Vec<Participant>, StoreError>> + Send;
    fn count(&self, event_id: i64) -> impl Future<Output = Result<i64, StoreError>> + Send;
}

/// Repository for recorded match results. Append-only from the engine's
/// point of view; the deletes exist for administrative cleanup.
pub trait MatchRepository: Send + Sync {
    fn record(
        &self,
        event_id: i64,
        record: &MatchRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// All records for an event across all rounds, oldest first.
    fn list_for_event(
        &self,
        event_id: i64,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, StoreError>> + Send;
    fn delete_for_event(&self, event_id: i64)
        -> impl Future<Output = Result<(), StoreError>> + Send;
    fn delete_all(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
