//! Match command - play one game between two players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_players(), report_results()
//! - Level 4: winner_name(), formatting utilities

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use changeup_core::{Color, Field, MoveRecord, Player, Score};
use changeup_tournament::{play_match, MatchOutcome, PlayerSpec};

use crate::roster::{build_player, create_rng};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Red player (moves first): random:<name>, policy:<name>=<file> or
    /// script:<name>=<action>,...
    #[arg(long, value_name = "SPEC", default_value = "random:Red")]
    pub red: PlayerSpec,

    /// Blue player, same forms as --red
    #[arg(long, value_name = "SPEC", default_value = "random:Blue")]
    pub blue: PlayerSpec,

    /// Print every move
    #[arg(long)]
    pub moves: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    red: &'a str,
    blue: &'a str,
    score: Score,
    winner: Option<&'a str>,
    wasted_moves: usize,
    moves: &'a [MoveRecord],
    field: &'a Field,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (mut red, mut blue) = build_players(&args, seed)?;

    tracing::info!("Starting match: {} (red) vs {} (blue)", red.name(), blue.name());

    let outcome = play_match(&mut red, &mut blue);
    report_results(&red, &blue, &outcome, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_players(args: &MatchArgs, seed: Option<u64>) -> Result<(Player, Player)> {
    let mut rng = create_rng(seed);
    let red = build_player(&args.red, &mut rng)?;
    let blue = build_player(&args.blue, &mut rng)?;
    Ok((red, blue))
}

fn report_results(red: &Player, blue: &Player, outcome: &MatchOutcome, args: &MatchArgs) -> Result<()> {
    let winner = winner_name(red, blue, outcome);

    if args.json {
        let report = MatchReport {
            red: red.name(),
            blue: blue.name(),
            score: outcome.score,
            winner,
            wasted_moves: outcome.wasted_moves(),
            moves: &outcome.moves,
            field: &outcome.field,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.moves {
        print_moves(&outcome.moves);
    }
    println!("{}\n", outcome.field);
    match winner {
        Some(name) => println!("Winner: {}", name),
        None => println!("Tie"),
    }
    println!("Wasted moves: {}", outcome.wasted_moves());
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Name of the winning player, None on a tie
fn winner_name<'a>(red: &'a Player, blue: &'a Player, outcome: &MatchOutcome) -> Option<&'a str> {
    outcome.winner().map(|color| match color {
        Color::Red => red.name(),
        Color::Blue => blue.name(),
    })
}

fn print_moves(moves: &[MoveRecord]) {
    for (i, record) in moves.iter().enumerate() {
        println!(
            "{:>2}. {:<4} {:<10}{}",
            i + 1,
            record.color.to_string(),
            record.action.to_string(),
            if record.applied { "" } else { " (wasted)" }
        );
    }
    println!();
}
