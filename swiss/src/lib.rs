//! Swiss-system pairing engine: standings, opponent history and round
//! pairing as pure functions over an event's roster and match records.
//! Persistence is the caller's concern.

pub mod history;
pub mod pairing;
pub mod standings;
pub mod types;

pub use history::OpponentHistory;
pub use pairing::{pair_round, PairingError};
pub use standings::compute_standings;
pub use types::{
    valid_score_pair, MatchRecord, Pairing, Participant, ParticipantId, RoundPairings,
    StandingsRow, BYE_NAME, DRAW, LOSS, WIN,
};
