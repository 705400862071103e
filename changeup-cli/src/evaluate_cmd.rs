//! Evaluate command - score one generation of genomes
//!
//! Loads weight-table genomes, runs the fitness adapter over them exactly
//! as an external trainer would once per generation, and reports the
//! fitness written back to each genome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use changeup_tournament::{evaluate_genomes, genome_player_name, FitnessConfig, GenerationSummary};

use crate::policy_file::{load_genomes, Activation, GenomeRecord, NetworkConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct EvaluateArgs {
    /// JSON array of genomes: [{"id", "weights": 18x10, "bias": 18}]
    #[arg(long, value_name = "FILE")]
    pub genomes: PathBuf,

    /// Round-robin repetitions for the generation
    #[arg(long, default_value = "1")]
    pub rounds: usize,

    /// Output squashing for every network
    #[arg(long, value_enum, default_value_t = Activation::Identity)]
    pub activation: Activation,

    /// Write fitness values to this JSON file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct FitnessEntry {
    id: u64,
    player: String,
    fitness: f64,
}

#[derive(Serialize)]
struct FitnessReport {
    summary: GenerationSummary,
    genomes: Vec<FitnessEntry>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evaluate command
pub fn run(args: EvaluateArgs) -> Result<()> {
    if args.rounds == 0 {
        anyhow::bail!("--rounds must be at least 1");
    }

    let mut genomes: Vec<(u64, GenomeRecord)> = load_genomes(&args.genomes)?
        .into_iter()
        .map(|genome| (genome.id, genome))
        .collect();

    tracing::info!("Evaluating {} genomes from {}", genomes.len(), args.genomes.display());

    let network = NetworkConfig {
        activation: args.activation,
    };
    let summary = evaluate_genomes(
        &mut genomes,
        &network,
        GenomeRecord::build_policy,
        &FitnessConfig::new(args.rounds),
    )?;

    let report = build_report(summary, &genomes);
    save_or_print(&report, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_report(summary: GenerationSummary, genomes: &[(u64, GenomeRecord)]) -> FitnessReport {
    FitnessReport {
        summary,
        genomes: genomes
            .iter()
            .map(|(id, genome)| FitnessEntry {
                id: *id,
                player: genome_player_name(id),
                fitness: genome.fitness.unwrap_or(0.0),
            })
            .collect(),
    }
}

fn save_or_print(report: &FitnessReport, args: &EvaluateArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let content = serde_json::to_string_pretty(report)?;
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write fitness file: {}", path.display()))?;
            tracing::info!("Saved fitness for {} genomes to {}", report.genomes.len(), path.display());
        }
        None => {
            println!("\n=== Generation Fitness ===");
            for entry in &report.genomes {
                println!("  {:<12} {:>4}", entry.player, entry.fitness);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use changeup_core::{POLICY_INPUTS, POLICY_OUTPUTS};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    /// Genome whose network always scores into `goal`
    fn genome_json(id: u64, goal: usize) -> Value {
        let weights = vec![vec![0.0; POLICY_INPUTS]; POLICY_OUTPUTS];
        let mut bias = vec![0.0; POLICY_OUTPUTS];
        bias[goal] = 1.0;
        json!({
            "id": id,
            "weights": weights,
            "bias": bias,
        })
    }

    fn write_genomes(dir: &TempDir, genomes: &[Value]) -> PathBuf {
        let path = dir.path().join("generation.json");
        std::fs::write(&path, serde_json::to_string(genomes).unwrap()).unwrap();
        path
    }

    fn evaluate_args(genomes: PathBuf, rounds: usize, output: Option<PathBuf>) -> EvaluateArgs {
        EvaluateArgs {
            genomes,
            rounds,
            activation: Activation::Identity,
            output,
        }
    }

    fn read_report(path: &std::path::Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_writes_fitness_file() {
        let dir = TempDir::new().unwrap();
        // Both networks crowd goal 4, so whoever plays red wins
        let genomes = write_genomes(&dir, &[genome_json(7, 4), genome_json(9, 4)]);
        let output = dir.path().join("fitness.json");

        run(evaluate_args(genomes, 1, Some(output.clone()))).unwrap();

        let report = read_report(&output);
        assert_eq!(report["summary"]["genomes"], 2);
        assert_eq!(report["summary"]["matches_played"], 2);
        assert_eq!(report["summary"]["high_score"], 2);
        assert_eq!(report["genomes"][0]["id"], 7);
        assert_eq!(report["genomes"][0]["player"], "NEAT-7");
        assert_eq!(report["genomes"][0]["fitness"], 1.0);
        assert_eq!(report["genomes"][1]["player"], "NEAT-9");
        assert_eq!(report["genomes"][1]["fitness"], 1.0);
    }

    #[test]
    fn test_run_separate_goals_zero_fitness() {
        let dir = TempDir::new().unwrap();
        let genomes = write_genomes(&dir, &[genome_json(1, 0), genome_json(2, 8), genome_json(3, 2)]);
        let output = dir.path().join("fitness.json");

        run(evaluate_args(genomes, 2, Some(output.clone()))).unwrap();

        let report = read_report(&output);
        assert_eq!(report["summary"]["matches_played"], 12);
        let entries = report["genomes"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|entry| entry["fitness"] == 0.0));
    }

    #[test]
    fn test_zero_rounds_rejected_before_loading() {
        let args = evaluate_args(PathBuf::from("/nonexistent/changeup/genomes.json"), 0, None);
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("--rounds"));
    }

    #[test]
    fn test_malformed_genome_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("generation.json");
        std::fs::write(&path, r#"[{"id": 1, "weights": [], "bias": []}]"#).unwrap();

        assert!(run(evaluate_args(path, 1, None)).is_err());
    }

    #[test]
    fn test_build_report_aligns_ids_and_fitness() {
        let mut scored: GenomeRecord = serde_json::from_value(genome_json(4, 0)).unwrap();
        scored.fitness = Some(3.0);
        let unscored: GenomeRecord = serde_json::from_value(genome_json(5, 1)).unwrap();

        let summary = GenerationSummary {
            genomes: 2,
            matches_played: 2,
            high_score: 3,
            average_score: 6.0,
        };
        let report = build_report(summary, &[(4, scored), (5, unscored)]);

        assert_eq!(report.genomes[0].id, 4);
        assert_eq!(report.genomes[0].player, "NEAT-4");
        assert_eq!(report.genomes[0].fitness, 3.0);
        assert_eq!(report.genomes[1].fitness, 0.0);
    }
}
