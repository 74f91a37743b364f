//! Thin command-line adapter over the tournament manager.
//!
//! Every subcommand maps onto one manager operation; no tournament logic
//! lives here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config;
use crate::persistence::sqlite::{
    Database, SqliteEventRepository, SqliteMatchRepository, SqlitePlayerRepository,
    SqliteRegistrationRepository,
};
use crate::tournament::TournamentManager;

#[derive(Parser)]
#[command(
    name = "monrad-server",
    about = "Swiss-system tournament standings and pairings",
    version
)]
pub struct Cli {
    /// Path to the SQLite database. Defaults to <data dir>/tournament.db.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new event.
    CreateEvent {
        name: String,
        /// Optional event date, free-form (e.g. 2026-09-12).
        #[arg(long)]
        date: Option<String>,
    },
    /// Register a new player.
    RegisterPlayer { name: String },
    /// Enroll a registered player into an event.
    Enroll { event: i64, player: i64 },
    /// Remove a player from an event's roster.
    Withdraw { event: i64, player: i64 },
    /// List all registered players.
    ListPlayers {
        #[arg(long)]
        json: bool,
    },
    /// List all events.
    ListEvents {
        #[arg(long)]
        json: bool,
    },
    /// Show the ranked standings of an event.
    Standings {
        event: i64,
        #[arg(long)]
        json: bool,
    },
    /// Generate the next round's pairings for an event.
    Pair {
        event: i64,
        round: u32,
        #[arg(long)]
        json: bool,
    },
    /// Report the result of a completed match.
    Report {
        event: i64,
        round: u32,
        player_one: i64,
        player_two: i64,
        /// Score of the first player: 1, 0.5 or 0.
        score_one: f64,
        /// Score of the second player: 1, 0.5 or 0.
        score_two: f64,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = cli
        .db
        .unwrap_or_else(|| config::get_data_dir().join(config::DB_FILE));
    tracing::info!("Using database: {}", db_path.display());

    let db = Database::open(&db_path).await?;
    let manager = TournamentManager::new(
        SqlitePlayerRepository::new(db.pool().clone()),
        SqliteEventRepository::new(db.pool().clone()),
        SqliteRegistrationRepository::new(db.pool().clone()),
        SqliteMatchRepository::new(db.pool().clone()),
    );

    match cli.command {
        Command::CreateEvent { name, date } => {
            let event = manager.create_event(&name, date.as_deref()).await?;
            println!("Created event {}: {}", event.id, event.name);
        }
        Command::RegisterPlayer { name } => {
            let player = manager.register_player(&name).await?;
            println!("Registered player {}: {}", player.id, player.name);
        }
        Command::Enroll { event, player } => {
            manager.enroll(event, player).await?;
            println!("Enrolled player {player} into event {event}");
        }
        Command::Withdraw { event, player } => {
            manager.withdraw(event, player).await?;
            println!("Withdrew player {player} from event {event}");
        }
        Command::ListPlayers { json } => {
            let players = manager.list_players().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else {
                for player in players {
                    println!("{:>6}  {}", player.id, player.name);
                }
            }
        }
        Command::ListEvents { json } => {
            let events = manager.list_events().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                for event in events {
                    let date = event.event_date.as_deref().unwrap_or("-");
                    println!("{:>6}  {}  ({date})", event.id, event.name);
                }
            }
        }
        Command::Standings { event, json } => {
            let standings = manager.standings(event).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                println!("{:>4}  {:<24} {:>6}  {:>7}", "id", "name", "points", "matches");
                for row in standings {
                    println!(
                        "{:>4}  {:<24} {:>6}  {:>7}",
                        row.id, row.name, row.points, row.matches
                    );
                }
            }
        }
        Command::Pair { event, round, json } => {
            let result = manager.next_round_pairings(event, round).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for pairing in &result.pairings {
                    println!(
                        "{} ({}) vs {} ({})",
                        pairing.player_one_name,
                        pairing.player_one,
                        pairing.player_two_name,
                        pairing.player_two
                    );
                }
                for (a, b) in &result.rematches {
                    println!("warning: {a} and {b} meet again, no alternative existed");
                }
            }
        }
        Command::Report {
            event,
            round,
            player_one,
            player_two,
            score_one,
            score_two,
        } => {
            manager
                .report_match(event, round, player_one, player_two, score_one, score_two)
                .await?;
            println!("Recorded round {round}: {player_one} {score_one} - {score_two} {player_two}");
        }
    }

    Ok(())
}
