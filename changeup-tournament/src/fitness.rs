//! Fitness evaluation for an external trainer
//!
//! Level 2 - Phase-level implementation
//!
//! The trainer owns the genomes and knows how to turn one into a decision
//! policy. Once per generation it hands the whole population over; every
//! genome gets a policy-driven player, the players meet in one tournament,
//! and each genome's win count is written back as its fitness.

use std::fmt::Display;

use changeup_core::{DecisionPolicy, Player};
use serde::Serialize;

use crate::config::{ConfigError, FitnessConfig};
use crate::tournament::run_tournament;

/// Caller-owned genome record that receives a fitness value
pub trait Genome {
    fn set_fitness(&mut self, fitness: f64);
}

/// Generation statistics, for reporting only
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// Genomes evaluated
    pub genomes: usize,
    /// Matches played in the generation's tournament
    pub matches_played: u32,
    /// Highest single-color total of any match
    pub high_score: u32,
    /// Average of both totals per match
    pub average_score: f64,
}

/// Player name for a genome
pub fn genome_player_name(genome_id: impl Display) -> String {
    format!("NEAT-{}", genome_id)
}

/// Evaluate one generation (Level 2 phase)
///
/// # Arguments
/// * `genomes` - `(id, genome)` pairs; each genome's fitness is overwritten
/// * `config` - Trainer configuration, passed unmodified to `build_policy`
/// * `build_policy` - Builds the network for one genome
/// * `settings` - Tournament settings for this generation
///
/// # Returns
/// Generation statistics. Fitness values are only written to the genomes.
/// Invalid `settings` are rejected before any fitness is touched.
pub fn evaluate_genomes<Id, G, C, P, F>(
    genomes: &mut [(Id, G)],
    config: &C,
    build_policy: F,
    settings: &FitnessConfig,
) -> Result<GenerationSummary, ConfigError>
where
    Id: Display,
    G: Genome,
    P: DecisionPolicy + 'static,
    F: Fn(&G, &C) -> P,
{
    let tournament = settings.tournament_config();
    tournament.validate()?;

    let mut players = build_roster(genomes, config, &build_policy);
    let result = run_tournament(&mut players, &tournament)?;

    for ((_, genome), &wins) in genomes.iter_mut().zip(&result.wins) {
        genome.set_fitness(wins as f64);
    }

    let summary = GenerationSummary {
        genomes: genomes.len(),
        matches_played: result.matches_played,
        high_score: result.high_score,
        average_score: result.average_score(),
    };

    tracing::info!("High score: {}", summary.high_score);
    tracing::info!("Average score: {:.2}", summary.average_score);

    Ok(summary)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Reset every fitness and wrap each genome's policy in a player
fn build_roster<Id, G, C, P, F>(genomes: &mut [(Id, G)], config: &C, build_policy: &F) -> Vec<Player>
where
    Id: Display,
    G: Genome,
    P: DecisionPolicy + 'static,
    F: Fn(&G, &C) -> P,
{
    genomes
        .iter_mut()
        .map(|(id, genome)| {
            genome.set_fitness(0.0);
            let policy = build_policy(&*genome, config);
            Player::with_policy(genome_player_name(&*id), policy)
        })
        .collect()
}
