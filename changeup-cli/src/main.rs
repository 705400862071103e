//! ChangeUp CLI - Command-line interface
//!
//! Commands:
//! - tournament: Round-robin between random and policy players
//! - match: Play a single game and print the board
//! - evaluate: Score one generation of genomes for a trainer

mod evaluate_cmd;
mod match_cmd;
mod policy_file;
mod roster;
mod tournament_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "changeup")]
#[command(about = "ChangeUp game engine and tournament runner")]
struct Cli {
    /// Seed for random players (entropy when absent)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a round-robin tournament
    Tournament(tournament_cmd::TournamentArgs),
    /// Play a single match
    Match(match_cmd::MatchArgs),
    /// Evaluate a generation of genomes
    Evaluate(evaluate_cmd::EvaluateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament(args) => tournament_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Evaluate(args) => evaluate_cmd::run(args),
    }
}
