//! Weight-table policies loaded from JSON
//!
//! A stand-in for an externally built network: one affine layer from the
//! 10 policy inputs to the 18 action preferences, followed by an optional
//! squashing function.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use changeup_core::{DecisionPolicy, POLICY_INPUTS, POLICY_OUTPUTS};
use changeup_tournament::Genome;

/// Output squashing applied after the affine layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Identity,
    Tanh,
    Sigmoid,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

/// Network settings shared by every genome of a generation
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkConfig {
    pub activation: Activation,
}

/// `outputs = activation(weights * inputs + bias)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearPolicy {
    pub weights: [[f64; POLICY_INPUTS]; POLICY_OUTPUTS],
    pub bias: [f64; POLICY_OUTPUTS],
    #[serde(default)]
    pub activation: Activation,
}

impl LinearPolicy {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid policy file: {}", path.display()))
    }
}

impl DecisionPolicy for LinearPolicy {
    fn activate(&self, inputs: &[f64; POLICY_INPUTS]) -> [f64; POLICY_OUTPUTS] {
        std::array::from_fn(|row| {
            let sum: f64 = self.weights[row]
                .iter()
                .zip(inputs)
                .map(|(w, x)| w * x)
                .sum();
            self.activation.apply(sum + self.bias[row])
        })
    }
}

/// A genome as stored in a generation file
#[derive(Clone, Debug, Deserialize)]
pub struct GenomeRecord {
    pub id: u64,
    pub weights: [[f64; POLICY_INPUTS]; POLICY_OUTPUTS],
    pub bias: [f64; POLICY_OUTPUTS],
    #[serde(skip)]
    pub fitness: Option<f64>,
}

impl GenomeRecord {
    /// Build the genome's network
    pub fn build_policy(&self, config: &NetworkConfig) -> LinearPolicy {
        LinearPolicy {
            weights: self.weights,
            bias: self.bias,
            activation: config.activation,
        }
    }
}

impl Genome for GenomeRecord {
    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

/// Load a JSON array of genomes
pub fn load_genomes(path: &Path) -> Result<Vec<GenomeRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read genome file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid genome file: {}", path.display()))
}
