//! Canonical tournament types shared by the engine and the store.

use serde::{Deserialize, Serialize};

/// Store-assigned player identifier. Ids are monotonically increasing, so
/// they double as the deterministic tie-break key for standings.
pub type ParticipantId = i64;

/// Reserved name of the synthetic bye player. A single bye player is
/// shared across all events; enrolling it is how odd rosters are evened.
pub const BYE_NAME: &str = "Bye";

/// Score a participant takes from a single match.
pub const WIN: f64 = 1.0;
pub const DRAW: f64 = 0.5;
pub const LOSS: f64 = 0.0;

/// A player enrolled in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// One completed match inside an event. Records are append-only: once
/// reported they are never edited, and standings are recomputed from the
/// full record set on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub round: u32,
    pub player_one: ParticipantId,
    pub player_two: ParticipantId,
    pub score_one: f64,
    pub score_two: f64,
}

impl MatchRecord {
    /// Whether this record references `id` on either side.
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.player_one == id || self.player_two == id
    }

    /// Score taken by `id`, if they played in this match.
    pub fn score_for(&self, id: ParticipantId) -> Option<f64> {
        if self.player_one == id {
            Some(self.score_one)
        } else if self.player_two == id {
            Some(self.score_two)
        } else {
            None
        }
    }
}

/// A reported score pair is valid when each side took a win, draw or loss
/// share and the shares sum to one. All three values are exactly
/// representable in an `f64`, so the comparisons are exact.
pub fn valid_score_pair(score_one: f64, score_two: f64) -> bool {
    let valid = |s: f64| s == WIN || s == DRAW || s == LOSS;
    valid(score_one) && valid(score_two) && score_one + score_two == 1.0
}

/// One row of the ranked standings. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub id: ParticipantId,
    pub name: String,
    /// Sum of this participant's recorded scores.
    pub points: f64,
    /// Number of recorded matches this participant appears in.
    pub matches: u32,
}

/// Two participants scheduled to play each other. Semantically unordered;
/// `player_one` is simply the higher-ranked side at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player_one: ParticipantId,
    pub player_one_name: String,
    pub player_two: ParticipantId,
    pub player_two_name: String,
}

impl Pairing {
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.player_one == id || self.player_two == id
    }
}

/// The pairings for one round, together with any matchups the engine was
/// forced to repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundPairings {
    /// Complete matching of the roster, in resolution order.
    pub pairings: Vec<Pairing>,
    /// Id pairs that already played each other in an earlier round but had
    /// to be matched again because no rematch-free arrangement existed.
    /// Empty in the normal case.
    pub rematches: Vec<(ParticipantId, ParticipantId)>,
}

impl RoundPairings {
    pub fn has_unavoidable_rematch(&self) -> bool {
        !self.rematches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_score_pairs() {
        assert!(valid_score_pair(WIN, LOSS));
        assert!(valid_score_pair(LOSS, WIN));
        assert!(valid_score_pair(DRAW, DRAW));
    }

    #[test]
    fn test_invalid_score_pairs() {
        assert!(!valid_score_pair(WIN, WIN));
        assert!(!valid_score_pair(DRAW, LOSS));
        assert!(!valid_score_pair(0.75, 0.25));
        assert!(!valid_score_pair(-1.0, 2.0));
    }

    #[test]
    fn test_score_for_either_side() {
        let record = MatchRecord {
            round: 1,
            player_one: 7,
            player_two: 9,
            score_one: WIN,
            score_two: LOSS,
        };
        assert_eq!(record.score_for(7), Some(WIN));
        assert_eq!(record.score_for(9), Some(LOSS));
        assert_eq!(record.score_for(11), None);
        assert!(record.involves(7));
        assert!(!record.involves(11));
    }
}
