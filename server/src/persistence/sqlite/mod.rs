//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode** — allows one writer and multiple concurrent readers.
//! - **Foreign keys enabled** — registration and match rows cascade when
//!   their event is deleted.
//! - **Embedded migrations** — `sqlx::migrate!` runs
//!   `migrations/001_initial_schema.sql` automatically when
//!   [`Database::open`] is called. The schema is idempotent.
//!
//! ## Repository types
//!
//! Each `Sqlite*Repository` holds a `SqlitePool` and implements the
//! corresponding trait from [`crate::persistence::traits`]:
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqlitePlayerRepository`] | `PlayerRepository` |
//! | [`SqliteEventRepository`] | `EventRepository` |
//! | [`SqliteRegistrationRepository`] | `RegistrationRepository` |
//! | [`SqliteMatchRepository`] | `MatchRepository` |

mod database;
mod event_repo;
mod match_repo;
mod player_repo;
mod registration_repo;

pub use database::Database;
pub use event_repo::SqliteEventRepository;
pub use match_repo::SqliteMatchRepository;
pub use player_repo::SqlitePlayerRepository;
pub use registration_repo::SqliteRegistrationRepository;
