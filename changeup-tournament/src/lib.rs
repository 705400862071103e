//! ChangeUp Tournament - Match play and fitness evaluation
//!
//! This crate provides tournament infrastructure:
//! - Fixed-length matches between two players
//! - Round-robin tournaments with win/score statistics
//! - The fitness adapter called by an external trainer each generation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: evaluate_genomes, play_match (phases)
//! - Level 3: pairings, roster building (steps)
//! - Level 4: utilities, configuration

mod config;
mod fitness;
mod match_play;
mod tournament;

pub use config::{ConfigError, FitnessConfig, PlayerSpec, TournamentConfig};
pub use fitness::{evaluate_genomes, genome_player_name, GenerationSummary, Genome};
pub use match_play::{play_match, MatchOutcome, ROUNDS_PER_MATCH};
pub use tournament::{run_tournament, TournamentResult};
