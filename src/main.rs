//! MTG Table - Main Binary
//!
//! Runs scripted demo sessions and verifies saved replay records

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mtg_table_rs::{
    core::PlayerId,
    game::{GameLogger, OutputFormat, ReplayRecord, VerbosityLevel},
    loader::{load_decks, DeckList},
    Action, GameSession, GameState, SessionConfig, Zone,
};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "table")]
#[command(about = "MTG Table - authoritative card table state engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short scripted session between two players and print the board
    Demo {
        /// Deck file (.dck) for player 1 (default: 40 Forest)
        #[arg(value_name = "PLAYER1_DECK")]
        deck1: Option<PathBuf>,

        /// Deck file (.dck) for player 2 (default: 40 Island)
        #[arg(value_name = "PLAYER2_DECK", requires = "deck1")]
        deck2: Option<PathBuf>,

        /// Session config file (JSON); flags below override it
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Set random seed for deterministic shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Starting life total
        #[arg(long)]
        starting_life: Option<i32>,

        /// Verbosity level for session output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v')]
        verbosity: Option<VerbosityLevel>,

        /// Session log line format (text or json)
        #[arg(long, value_name = "FORMAT")]
        output_format: Option<OutputFormat>,

        /// Reject unrecognized action types instead of ignoring them
        #[arg(long)]
        strict: bool,

        /// Write the session's replay record to this file
        #[arg(long, value_name = "RECORD_FILE")]
        record: Option<PathBuf>,
    },

    /// Verify replay records by re-applying their effects
    Replay {
        /// Record files written by `demo --record`
        #[arg(value_name = "RECORD_FILE", required = true)]
        records: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            deck1,
            deck2,
            config,
            seed,
            starting_life,
            verbosity,
            output_format,
            strict,
            record,
        } => {
            let mut config = match config {
                Some(path) => SessionConfig::load_from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SessionConfig::default(),
            };
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(life) = starting_life {
                config.starting_life = life;
            }
            if let Some(verbosity) = verbosity {
                config.verbosity = verbosity;
            }
            if let Some(format) = output_format {
                config.output_format = format;
            }
            config.strict_actions |= strict;

            let decks = load_demo_decks(deck1, deck2).await?;
            run_demo(config, decks, record)
        }
        Commands::Replay { records } => run_replay(&records),
    }
}

async fn load_demo_decks(deck1: Option<PathBuf>, deck2: Option<PathBuf>) -> anyhow::Result<[DeckList; 2]> {
    let Some(deck1) = deck1 else {
        return Ok([DeckList::uniform("Forest", 40), DeckList::uniform("Island", 40)]);
    };

    println!("Loading deck files...");
    let paths: Vec<PathBuf> = std::iter::once(deck1).chain(deck2).collect();
    let mut decks = load_decks(&paths).await.context("loading decks")?.into_iter();
    let Some(first) = decks.next() else {
        bail!("no deck loaded");
    };
    // One deck file means both players use it
    let second = decks.next().unwrap_or_else(|| first.clone());
    println!("  Player 1: {} cards", first.total_cards());
    println!("  Player 2: {} cards\n", second.total_cards());
    Ok([first, second])
}

fn run_demo(config: SessionConfig, decks: [DeckList; 2], record: Option<PathBuf>) -> anyhow::Result<()> {
    println!("=== MTG Table - Demo Session ===\n");
    if let Some(seed) = config.seed {
        println!("Using random seed: {seed}");
    }

    let mut session = GameSession::with_players(config, &["Alice", "Bob"]);
    let players: Vec<PlayerId> = session.state().players.iter().map(|p| p.id).collect();
    let (alice, bob) = (players[0], players[1]);
    session.import_deck(alice, &decks[0])?;
    session.import_deck(bob, &decks[1])?;

    for &player in &players {
        session.dispatch(Action::Shuffle {
            player,
            zone: Zone::Library,
        })?;
        session.dispatch(Action::Draw { player, count: 7 })?;
    }

    let hand = session.state().cards_in_zone(alice, Zone::Hand);
    if let Some(&card) = hand.first() {
        session.dispatch(Action::PlayCard {
            player: alice,
            card,
        })?;
        session.dispatch(Action::Tap {
            player: alice,
            card,
        })?;
    }
    session.dispatch(Action::ModifyLife {
        player: bob,
        delta: -3,
    })?;

    // A misclick, taken back
    session.dispatch(Action::ModifyLife {
        player: alice,
        delta: -20,
    })?;
    session.undo();

    if let Err(e) = session.dispatch(Action::Draw {
        player: PlayerId::new(999),
        count: 1,
    }) {
        println!("Rejected as expected: {e}\n");
    }

    print_board(session.state());

    if let Some(path) = record {
        let replay = session.into_record();
        replay
            .save_to_file(&path)
            .with_context(|| format!("writing record {}", path.display()))?;
        println!(
            "\nSaved {} actions ({} effects) to {}",
            replay.action_count(),
            replay.effect_count(),
            path.display()
        );
    }
    Ok(())
}

fn print_board(state: &GameState) {
    println!("=== Board ===");
    for player in &state.players {
        println!("  {}: {} life", player.name, player.life);
        for zone in Zone::ALL {
            let size = state.zone_size(player.id, zone);
            if size > 0 {
                println!("    {zone}: {size}");
            }
        }
        for card_id in state.cards_in_zone(player.id, Zone::Battlefield) {
            if let Ok(card) = state.get_card(card_id) {
                let tapped = if card.tapped { " (tapped)" } else { "" };
                println!("      {}{tapped}", card.name);
            }
        }
    }

    println!("\n=== Log (newest first) ===");
    for entry in state.display_log.iter() {
        println!("  [{}] {}", entry.label, entry.detail);
    }
}

fn run_replay(records: &[PathBuf]) -> anyhow::Result<()> {
    let results: Vec<(PathBuf, mtg_table_rs::Result<ReplayRecord>)> = records
        .par_iter()
        .map(|path| {
            let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
            let result = ReplayRecord::load_from_file(path)
                .and_then(|record| record.verify(&logger).map(|_| record));
            (path.clone(), result)
        })
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        match result {
            Ok(record) => println!(
                "OK   {} ({} actions, {} effects)",
                path.display(),
                record.action_count(),
                record.effect_count()
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL {}: {e}", path.display());
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} records failed verification", results.len());
    }
    Ok(())
}
