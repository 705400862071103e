//! Tournament command - round-robin over a roster
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_repeated(), report_results()
//! - Level 3: summarize()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use changeup_core::Player;
use changeup_tournament::{run_tournament, PlayerSpec, TournamentConfig, TournamentResult};

use crate::roster::{build_roster, create_rng, default_specs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    /// Roster entry: random:<name>, policy:<name>=<file> or
    /// script:<name>=<action>,... (repeatable).
    /// Defaults to four random players.
    #[arg(long = "player", value_name = "SPEC")]
    pub players: Vec<PlayerSpec>,

    /// Round-robin repetitions per tournament
    #[arg(long, default_value = "1")]
    pub rounds: usize,

    /// Independent tournaments to run and aggregate
    #[arg(long, default_value = "1")]
    pub repeat: usize,

    /// Log every final board (visible with RUST_LOG=debug)
    #[arg(long)]
    pub show_boards: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlayerReport {
    name: String,
    kind: String,
    wins: u32,
}

#[derive(Serialize)]
struct TournamentReport {
    tournaments: usize,
    matches_played: u32,
    high_score: u32,
    total_score: u64,
    average_score: f64,
    players: Vec<PlayerReport>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
///
/// 1. Build the roster
/// 2. Play the requested tournaments
/// 3. Report aggregated statistics
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let config = TournamentConfig::with_rounds(args.rounds).show_boards(args.show_boards);
    config.validate()?;
    if args.repeat == 0 {
        anyhow::bail!("--repeat must be at least 1");
    }

    let specs = if args.players.is_empty() {
        default_specs()
    } else {
        args.players.clone()
    };

    let mut rng = create_rng(seed);
    let mut players = build_roster(&specs, &mut rng)?;

    tracing::info!(
        "Starting tournament: {} players, {} round(s), {} repetition(s)",
        players.len(),
        config.rounds,
        args.repeat
    );

    let result = run_repeated(&mut players, &config, args.repeat)?;
    let report = summarize(&players, &result, args.repeat);
    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play `repeat` tournaments and combine them
fn run_repeated(
    players: &mut [Player],
    config: &TournamentConfig,
    repeat: usize,
) -> Result<TournamentResult> {
    if repeat == 1 {
        return Ok(run_tournament(players, config)?);
    }

    let progress = ProgressBar::new(repeat as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} tournaments ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut total = TournamentResult::new(players.len());
    for _ in 0..repeat {
        total = total.combine(&run_tournament(players, config)?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(total)
}

/// Print the report
fn report_results(report: &TournamentReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_results(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn summarize(players: &[Player], result: &TournamentResult, tournaments: usize) -> TournamentReport {
    TournamentReport {
        tournaments,
        matches_played: result.matches_played,
        high_score: result.high_score,
        total_score: result.total_score,
        average_score: result.average_score(),
        players: players
            .iter()
            .zip(&result.wins)
            .map(|(player, &wins)| PlayerReport {
                name: player.name().to_string(),
                kind: player.kind().to_string(),
                wins,
            })
            .collect(),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(report: &TournamentReport) {
    println!("\n=== Tournament Results ===");
    println!("Tournaments:   {}", report.tournaments);
    println!("Matches:       {}", report.matches_played);
    println!("High score:    {}", report.high_score);
    println!("Average score: {:.2}", report.average_score);

    println!("\nStandings:");
    for player in &report.players {
        println!("  {:<12} {:<7} {} wins", player.name, player.kind, player.wins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_aligns_players_and_wins() {
        let players = vec![Player::random("Foo", 1), Player::random("Bar", 2)];
        let result = TournamentResult {
            wins: vec![3, 1],
            high_score: 12,
            total_score: 40,
            matches_played: 4,
        };

        let report = summarize(&players, &result, 2);
        assert_eq!(report.players[0].name, "Foo");
        assert_eq!(report.players[0].wins, 3);
        assert_eq!(report.players[1].kind, "random");
        assert_eq!(report.average_score, 10.0);
    }

    #[test]
    fn test_run_repeated_accumulates() {
        let mut players = vec![Player::random("Foo", 1), Player::random("Bar", 2)];
        let result = run_repeated(&mut players, &TournamentConfig::default(), 3).unwrap();
        assert_eq!(result.matches_played, 6);
        assert_eq!(result.wins.len(), 2);
    }

    fn args_with(rounds: usize, repeat: usize) -> TournamentArgs {
        TournamentArgs {
            players: Vec::new(),
            rounds,
            repeat,
            show_boards: false,
            json: true,
        }
    }

    #[test]
    fn test_zero_repeat_rejected() {
        let err = run(args_with(1, 0), Some(7)).unwrap_err();
        assert!(err.to_string().contains("--repeat"));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        assert!(run(args_with(0, 1), Some(7)).is_err());
    }

    #[test]
    fn test_scripted_roster_runs() {
        let mut args = args_with(1, 2);
        args.players = vec![
            "script:Center=score:4".parse().unwrap(),
            "random:Foo".parse().unwrap(),
        ];
        assert!(run(args, Some(7)).is_ok());
    }
}
