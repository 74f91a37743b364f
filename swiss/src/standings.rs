//! Standings computation: points and match counts per roster member.

use std::collections::HashMap;

use crate::types::{MatchRecord, Participant, ParticipantId, StandingsRow};

/// Rank `roster` by the points accumulated in `records`.
///
/// Every roster member appears exactly once; participants with no recorded
/// matches show zero points and zero matches. Records referencing players
/// outside the roster contribute nothing. Ordering is points descending
/// with participant id ascending breaking ties, so the output is
/// reproducible regardless of input order. Runs in O(roster + records).
pub fn compute_standings(roster: &[Participant], records: &[MatchRecord]) -> Vec<StandingsRow> {
    let mut tally: HashMap<ParticipantId, (f64, u32)> =
        roster.iter().map(|p| (p.id, (0.0, 0))).collect();

    for record in records {
        if let Some((points, matches)) = tally.get_mut(&record.player_one) {
            *points += record.score_one;
            *matches += 1;
        }
        if let Some((points, matches)) = tally.get_mut(&record.player_two) {
            *points += record.score_two;
            *matches += 1;
        }
    }

    let mut rows: Vec<StandingsRow> = roster
        .iter()
        .map(|p| {
            let (points, matches) = tally.get(&p.id).copied().unwrap_or((0.0, 0));
            StandingsRow {
                id: p.id,
                name: p.name.clone(),
                points,
                matches,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.points.total_cmp(&a.points).then(a.id.cmp(&b.id)));
    rows
}
