//! The tournament manager ties the pure pairing engine to the store.

use swiss::{
    valid_score_pair, MatchRecord, OpponentHistory, Participant, RoundPairings, StandingsRow,
    BYE_NAME,
};

use super::TournamentError;
use crate::persistence::traits::{
    EventRepository, MatchRepository, PlayerRepository, RegistrationRepository,
};
use crate::persistence::{EventRecord, PlayerRecord};

/// Orchestrates tournament operations over the four repositories.
///
/// The manager holds no tournament state of its own: rosters, standings
/// and opponent history are rebuilt from the store on every call, so each
/// invocation sees a fresh snapshot. Pairing generation for an event must
/// be serialized against itself and against match reporting for that same
/// event by the caller; the manager takes no locks.
pub struct TournamentManager<P, E, R, M> {
    players: P,
    events: E,
    registrations: R,
    matches: M,
}

impl<P, E, R, M> TournamentManager<P, E, R, M>
where
    P: PlayerRepository,
    E: EventRepository,
    R: RegistrationRepository,
    M: MatchRepository,
{
    pub fn new(players: P, events: E, registrations: R, matches: M) -> Self {
        Self {
            players,
            events,
            registrations,
            matches,
        }
    }

    pub async fn register_player(&self, name: &str) -> Result<PlayerRecord, TournamentError> {
        let player = self.players.create(name).await?;
        tracing::info!(id = player.id, name = %player.name, "registered player");
        Ok(player)
    }

    pub async fn create_event(
        &self,
        name: &str,
        event_date: Option<&str>,
    ) -> Result<EventRecord, TournamentError> {
        let event = self.events.create(name, event_date).await?;
        tracing::info!(id = event.id, name = %event.name, "created event");
        Ok(event)
    }

    /// Add a registered player to an event's roster.
    pub async fn enroll(&self, event_id: i64, player_id: i64) -> Result<(), TournamentError> {
        self.require_event(event_id).await?;
        self.require_player(player_id).await?;
        self.registrations.add(event_id, player_id).await?;
        tracing::info!(event_id, player_id, "enrolled player");
        Ok(())
    }

    /// Remove a player from an event's roster. Recorded matches are
    /// append-only and stay behind.
    pub async fn withdraw(&self, event_id: i64, player_id: i64) -> Result<(), TournamentError> {
        self.require_event(event_id).await?;
        self.require_player(player_id).await?;
        self.registrations.remove(event_id, player_id).await?;
        tracing::info!(event_id, player_id, "withdrew player");
        Ok(())
    }

    pub async fn list_players(&self) -> Result<Vec<PlayerRecord>, TournamentError> {
        Ok(self.players.list().await?)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRecord>, TournamentError> {
        Ok(self.events.list().await?)
    }

    /// Ranked standings for an event, computed fresh from the roster and
    /// the full match record set.
    pub async fn standings(&self, event_id: i64) -> Result<Vec<StandingsRow>, TournamentError> {
        self.require_event(event_id).await?;
        let roster = self.registrations.roster(event_id).await?;
        let records = self.matches.list_for_event(event_id).await?;
        Ok(swiss::compute_standings(&roster, &records))
    }

    /// Ensure the event's roster has an even size, enrolling the shared
    /// bye player when it is odd.
    ///
    /// This is the one operation that writes registration state as a side
    /// effect: an odd roster gains the canonical bye player (created on
    /// first use across the whole store) as an ordinary member. A second
    /// call on the now-even roster is a no-op, so normalization is
    /// idempotent.
    pub async fn normalize_roster(
        &self,
        event_id: i64,
    ) -> Result<Vec<Participant>, TournamentError> {
        self.require_event(event_id).await?;
        let roster = self.registrations.roster(event_id).await?;
        if roster.len() % 2 == 0 {
            return Ok(roster);
        }

        let bye = self.ensure_bye_player().await?;
        tracing::info!(event_id, bye_id = bye.id, "odd roster, enrolling bye");
        self.registrations.add(event_id, bye.id).await?;
        Ok(self.registrations.roster(event_id).await?)
    }

    /// Pairings for the next round of an event.
    ///
    /// Normalizes the roster, ranks it, and matches neighbors in the
    /// standings while avoiding rematches; see [`swiss::pair_round`] for
    /// the repair behavior. Matchups the engine had to repeat are logged
    /// here and reported in the result, not raised as errors.
    pub async fn next_round_pairings(
        &self,
        event_id: i64,
        round: u32,
    ) -> Result<RoundPairings, TournamentError> {
        let roster = self.normalize_roster(event_id).await?;
        let records = self.matches.list_for_event(event_id).await?;
        let standings = swiss::compute_standings(&roster, &records);
        let history = OpponentHistory::from_records(&records);

        let result = swiss::pair_round(&standings, &history)?;
        for &(player_one, player_two) in &result.rematches {
            tracing::warn!(
                event_id,
                round,
                player_one,
                player_two,
                "no rematch-free pairing existed, repeating matchup"
            );
        }
        tracing::info!(
            event_id,
            round,
            pairings = result.pairings.len(),
            "generated round pairings"
        );
        Ok(result)
    }

    /// Record the outcome of a completed match.
    ///
    /// Scores are validated before anything is written; the record is
    /// append-only afterwards. Called by the round's caller, never from
    /// the pairing path.
    pub async fn report_match(
        &self,
        event_id: i64,
        round: u32,
        player_one: i64,
        player_two: i64,
        score_one: f64,
        score_two: f64,
    ) -> Result<(), TournamentError> {
        if !valid_score_pair(score_one, score_two) {
            return Err(TournamentError::InvalidScore(score_one, score_two));
        }
        self.require_event(event_id).await?;
        self.require_player(player_one).await?;
        self.require_player(player_two).await?;

        let record = MatchRecord {
            round,
            player_one,
            player_two,
            score_one,
            score_two,
        };
        self.matches.record(event_id, &record).await?;
        tracing::info!(event_id, round, player_one, player_two, "recorded match");
        Ok(())
    }

    /// Create-or-fetch the shared bye player by its reserved name.
    async fn ensure_bye_player(&self) -> Result<PlayerRecord, TournamentError> {
        if let Some(existing) = self.players.find_by_name(BYE_NAME).await? {
            return Ok(existing);
        }
        Ok(self.players.create(BYE_NAME).await?)
    }

    async fn require_event(&self, event_id: i64) -> Result<EventRecord, TournamentError> {
        self.events
            .get(event_id)
            .await?
            .ok_or(TournamentError::EventNotFound(event_id))
    }

    async fn require_player(&self, player_id: i64) -> Result<PlayerRecord, TournamentError> {
        self.players
            .get(player_id)
            .await?
            .ok_or(TournamentError::PlayerNotFound(player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{
        Database, SqliteEventRepository, SqliteMatchRepository, SqlitePlayerRepository,
        SqliteRegistrationRepository,
    };
    use swiss::{PairingError, DRAW, LOSS, WIN};

    type SqliteManager = TournamentManager<
        SqlitePlayerRepository,
        SqliteEventRepository,
        SqliteRegistrationRepository,
        SqliteMatchRepository,
    >;

    async fn manager() -> (Database, SqliteManager) {
        let db = Database::new_in_memory().await.unwrap();
        let manager = TournamentManager::new(
            SqlitePlayerRepository::new(db.pool().clone()),
            SqliteEventRepository::new(db.pool().clone()),
            SqliteRegistrationRepository::new(db.pool().clone()),
            SqliteMatchRepository::new(db.pool().clone()),
        );
        (db, manager)
    }

    /// Create an event with `n` enrolled players; returns (event, player ids).
    async fn event_with_players(manager: &SqliteManager, n: usize) -> (i64, Vec<i64>) {
        let event = manager.create_event("Test Open", None).await.unwrap();
        let mut ids = Vec::new();
        for i in 0..n {
            let player = manager
                .register_player(&format!("Player {}", i + 1))
                .await
                .unwrap();
            manager.enroll(event.id, player.id).await.unwrap();
            ids.push(player.id);
        }
        (event.id, ids)
    }

    #[tokio::test]
    async fn test_standings_before_any_match() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 4).await;
        let standings = manager.standings(event_id).await.unwrap();
        assert_eq!(standings.len(), 4);
        for row in &standings {
            assert_eq!(row.points, 0.0);
            assert_eq!(row.matches, 0);
        }
        // Tied at zero points: id ascending
        let listed: Vec<_> = standings.iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_standings_unknown_event() {
        let (_db, manager) = manager().await;
        let err = manager.standings(123).await.unwrap_err();
        assert!(matches!(err, TournamentError::EventNotFound(123)));
    }

    #[tokio::test]
    async fn test_normalize_even_roster_is_noop() {
        let (_db, manager) = manager().await;
        let (event_id, _ids) = event_with_players(&manager, 4).await;
        let roster = manager.normalize_roster(event_id).await.unwrap();
        assert_eq!(roster.len(), 4);
        assert!(roster.iter().all(|p| p.name != BYE_NAME));
    }

    #[tokio::test]
    async fn test_normalize_odd_roster_adds_bye_once() {
        let (_db, manager) = manager().await;
        let (event_id, _ids) = event_with_players(&manager, 3).await;

        let roster = manager.normalize_roster(event_id).await.unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.iter().filter(|p| p.name == BYE_NAME).count(), 1);

        // Idempotent: a second call adds nothing.
        let again = manager.normalize_roster(event_id).await.unwrap();
        assert_eq!(again.len(), 4);

        // Standings report the bye as a roster member too.
        let standings = manager.standings(event_id).await.unwrap();
        assert_eq!(standings.len(), 4);
    }

    #[tokio::test]
    async fn test_bye_player_shared_across_events() {
        let (_db, manager) = manager().await;
        let (first, _ids) = event_with_players(&manager, 3).await;
        let second_event = manager.create_event("Second Open", None).await.unwrap();
        let solo = manager.register_player("Solo").await.unwrap();
        manager.enroll(second_event.id, solo.id).await.unwrap();

        manager.normalize_roster(first).await.unwrap();
        manager.normalize_roster(second_event.id).await.unwrap();

        let byes: Vec<_> = manager
            .list_players()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.name == BYE_NAME)
            .collect();
        assert_eq!(byes.len(), 1);
    }

    #[tokio::test]
    async fn test_pairing_empty_event_is_insufficient() {
        let (_db, manager) = manager().await;
        let (event_id, _ids) = event_with_players(&manager, 0).await;
        let err = manager.next_round_pairings(event_id, 1).await.unwrap_err();
        assert!(matches!(
            err,
            TournamentError::Pairing(PairingError::InsufficientParticipants(0))
        ));
    }

    #[tokio::test]
    async fn test_single_player_gets_the_bye() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 1).await;
        let result = manager.next_round_pairings(event_id, 1).await.unwrap();
        assert_eq!(result.pairings.len(), 1);
        assert!(result.pairings[0].involves(ids[0]));
        let names = [
            result.pairings[0].player_one_name.as_str(),
            result.pairings[0].player_two_name.as_str(),
        ];
        assert!(names.contains(&BYE_NAME));
    }

    #[tokio::test]
    async fn test_round_two_pairs_winners_together() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 4).await;
        let round_one = manager.next_round_pairings(event_id, 1).await.unwrap();
        assert_eq!(round_one.pairings.len(), 2);

        // First-listed side wins each round-one match.
        for pairing in &round_one.pairings {
            manager
                .report_match(
                    event_id,
                    1,
                    pairing.player_one,
                    pairing.player_two,
                    WIN,
                    LOSS,
                )
                .await
                .unwrap();
        }

        let round_two = manager.next_round_pairings(event_id, 2).await.unwrap();
        assert!(!round_two.has_unavoidable_rematch());

        // Winners face winners, losers face losers, nobody repeats.
        let winners: Vec<i64> = round_one.pairings.iter().map(|p| p.player_one).collect();
        let losers: Vec<i64> = round_one.pairings.iter().map(|p| p.player_two).collect();
        for pairing in &round_two.pairings {
            let both_winners =
                winners.contains(&pairing.player_one) && winners.contains(&pairing.player_two);
            let both_losers =
                losers.contains(&pairing.player_one) && losers.contains(&pairing.player_two);
            assert!(both_winners || both_losers);
        }
        for pairing in &round_one.pairings {
            assert!(!round_two.pairings.iter().any(|p| {
                p.involves(pairing.player_one) && p.involves(pairing.player_two)
            }));
        }
        // Sanity: all four players covered.
        for id in &ids {
            assert_eq!(
                round_two.pairings.iter().filter(|p| p.involves(*id)).count(),
                1
            );
        }
    }

    #[tokio::test]
    async fn test_bye_is_not_repeated_when_avoidable() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 3).await;

        let round_one = manager.next_round_pairings(event_id, 1).await.unwrap();
        assert_eq!(round_one.pairings.len(), 2);
        for pairing in &round_one.pairings {
            manager
                .report_match(
                    event_id,
                    1,
                    pairing.player_one,
                    pairing.player_two,
                    WIN,
                    LOSS,
                )
                .await
                .unwrap();
        }

        let standings = manager.standings(event_id).await.unwrap();
        let bye_id = standings
            .iter()
            .find(|r| r.name == BYE_NAME)
            .map(|r| r.id)
            .unwrap();
        let first_bye_opponent = round_one
            .pairings
            .iter()
            .find(|p| p.involves(bye_id))
            .map(|p| {
                if p.player_one == bye_id {
                    p.player_two
                } else {
                    p.player_one
                }
            })
            .unwrap();

        let round_two = manager.next_round_pairings(event_id, 2).await.unwrap();
        assert!(!round_two.has_unavoidable_rematch());
        let second_bye_opponent = round_two
            .pairings
            .iter()
            .find(|p| p.involves(bye_id))
            .map(|p| {
                if p.player_one == bye_id {
                    p.player_two
                } else {
                    p.player_one
                }
            })
            .unwrap();
        assert_ne!(first_bye_opponent, second_bye_opponent);
        assert!(ids.contains(&second_bye_opponent));
    }

    #[tokio::test]
    async fn test_report_match_rejects_bad_scores() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 2).await;
        let err = manager
            .report_match(event_id, 1, ids[0], ids[1], WIN, WIN)
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::InvalidScore(..)));

        let err = manager
            .report_match(event_id, 1, ids[0], ids[1], 0.75, 0.25)
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::InvalidScore(..)));

        // Nothing was recorded.
        let standings = manager.standings(event_id).await.unwrap();
        assert!(standings.iter().all(|r| r.matches == 0));
    }

    #[tokio::test]
    async fn test_report_match_requires_known_players() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 2).await;
        let err = manager
            .report_match(event_id, 1, ids[0], 999, WIN, LOSS)
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::PlayerNotFound(999)));

        let err = manager
            .report_match(777, 1, ids[0], ids[1], WIN, LOSS)
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::EventNotFound(777)));
    }

    #[tokio::test]
    async fn test_draws_flow_into_standings() {
        let (_db, manager) = manager().await;
        let (event_id, ids) = event_with_players(&manager, 2).await;
        manager
            .report_match(event_id, 1, ids[0], ids[1], DRAW, DRAW)
            .await
            .unwrap();
        let standings = manager.standings(event_id).await.unwrap();
        assert_eq!(standings[0].points, 0.5);
        assert_eq!(standings[1].points, 0.5);
        assert_eq!(standings[0].matches, 1);
    }

    #[tokio::test]
    async fn test_enroll_checks_both_sides() {
        let (_db, manager) = manager().await;
        let (event_id, _ids) = event_with_players(&manager, 1).await;
        let err = manager.enroll(event_id, 555).await.unwrap_err();
        assert!(matches!(err, TournamentError::PlayerNotFound(555)));
        let err = manager.enroll(888, 1).await.unwrap_err();
        assert!(matches!(err, TournamentError::EventNotFound(888)));
    }
}
