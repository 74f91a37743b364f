//! Tournament orchestration: standings, bye normalization, round pairing
//! and score-validated match reporting over the persistence layer.

mod manager;

pub use manager::TournamentManager;

use crate::persistence::StoreError;

/// Errors surfaced by tournament operations.
///
/// An unavoidable rematch is deliberately not in this enum: pairing still
/// completes and the affected matchups travel inside
/// [`swiss::RoundPairings::rematches`].
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("event {0} not found")]
    EventNotFound(i64),
    #[error("player {0} not found")]
    PlayerNotFound(i64),
    /// The reported scores are not a legal result: each side must take
    /// 1.0, 0.5 or 0.0 and the two must sum to 1.0.
    #[error("invalid score pair {0} / {1}")]
    InvalidScore(f64, f64),
    #[error(transparent)]
    Pairing(#[from] swiss::PairingError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
