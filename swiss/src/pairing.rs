//! Round pairing: greedy nearest-record matching with a local swap repair.

use crate::history::OpponentHistory;
use crate::types::{Pairing, ParticipantId, RoundPairings, StandingsRow};

/// Failures that abort a pairing request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    /// Fewer than two participants to pair. Zero participants is an error
    /// too, so a misconfigured event is distinguishable from "nothing to
    /// do".
    #[error("cannot pair a round with {0} participant(s)")]
    InsufficientParticipants(usize),
    /// The roster was not normalized to an even size before pairing. The
    /// engine refuses rather than silently dropping someone.
    #[error("cannot pair an odd roster of {0}; normalize it with a bye first")]
    UnevenRoster(usize),
}

/// Pair the next round from ranked standings.
///
/// Walks `standings` top-down, pairing each participant with the nearest
/// lower-ranked unpaired participant they have not yet faced. When no
/// rematch-free candidate remains for someone, an already-formed pair is
/// unwound if redistributing its members yields two rematch-free pairs;
/// failing that, the round completes with a repeat matchup, reported in
/// [`RoundPairings::rematches`].
///
/// The returned pairings always partition `standings` exactly (every
/// participant appears in exactly one pair) and are listed in resolution
/// order, which is not necessarily standings order once a repair has run.
pub fn pair_round(
    standings: &[StandingsRow],
    history: &OpponentHistory,
) -> Result<RoundPairings, PairingError> {
    let n = standings.len();
    if n < 2 {
        return Err(PairingError::InsufficientParticipants(n));
    }
    if n % 2 != 0 {
        return Err(PairingError::UnevenRoster(n));
    }

    // Work on indices into `standings`; pairs stay index pairs until the
    // end so the swap repair can rewrite an earlier slot cheaply.
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut resolved: Vec<(usize, usize)> = Vec::with_capacity(n / 2);
    let mut rematches: Vec<(ParticipantId, ParticipantId)> = Vec::new();

    while remaining.len() >= 2 {
        let current = remaining[0];
        let next_free = remaining[1..]
            .iter()
            .position(|&cand| !played(standings, history, current, cand));

        match next_free {
            Some(offset) => {
                let partner = remaining.remove(offset + 1);
                remaining.remove(0);
                resolved.push((current, partner));
            }
            None => {
                // Every remaining candidate is a rematch. Take the nearest
                // one and try to unwind an earlier pair instead.
                let fallback = remaining.remove(1);
                remaining.remove(0);

                if let Some((slot, first, second)) =
                    repair_swap(standings, history, &resolved, current, fallback)
                {
                    tracing::debug!(
                        blocked = standings[current].id,
                        unwound_slot = slot,
                        "repaired pairing by swapping an earlier pair"
                    );
                    resolved[slot] = first;
                    resolved.push(second);
                } else {
                    rematches.push((standings[current].id, standings[fallback].id));
                    resolved.push((current, fallback));
                }
            }
        }
    }

    let pairings = resolved
        .iter()
        .map(|&(a, b)| Pairing {
            player_one: standings[a].id,
            player_one_name: standings[a].name.clone(),
            player_two: standings[b].id,
            player_two_name: standings[b].name.clone(),
        })
        .collect();

    Ok(RoundPairings {
        pairings,
        rematches,
    })
}

/// Find an already-formed pair `(x, y)` whose members can be redistributed
/// between `blocked` and `fallback` so that both replacement pairs are
/// rematch-free. Returns the pair's slot and the two replacement pairs,
/// checking `(blocked, x)/(fallback, y)` before `(blocked, y)/(fallback, x)`
/// and taking the first arrangement that works.
fn repair_swap(
    standings: &[StandingsRow],
    history: &OpponentHistory,
    resolved: &[(usize, usize)],
    blocked: usize,
    fallback: usize,
) -> Option<(usize, (usize, usize), (usize, usize))> {
    for (slot, &(x, y)) in resolved.iter().enumerate() {
        if !played(standings, history, blocked, x) && !played(standings, history, fallback, y) {
            return Some((slot, (blocked, x), (fallback, y)));
        }
        if !played(standings, history, blocked, y) && !played(standings, history, fallback, x) {
            return Some((slot, (blocked, y), (fallback, x)));
        }
    }
    None
}

fn played(standings: &[StandingsRow], history: &OpponentHistory, a: usize, b: usize) -> bool {
    history.have_played(standings[a].id, standings[b].id)
}
