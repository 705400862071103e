//! Turning player specs into players

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use changeup_core::Player;
use changeup_tournament::PlayerSpec;

use crate::policy_file::LinearPolicy;

/// The four random players of the classic ad-hoc tournament
pub const DEFAULT_ROSTER: [&str; 4] = ["Foo", "Bar", "Baz", "Quux"];

/// Specs used when none are given
pub fn default_specs() -> Vec<PlayerSpec> {
    DEFAULT_ROSTER
        .iter()
        .map(|name| PlayerSpec::Random {
            name: name.to_string(),
        })
        .collect()
}

/// Build one player. Random players draw their seed from `rng`.
pub fn build_player(spec: &PlayerSpec, rng: &mut ChaCha8Rng) -> Result<Player> {
    match spec {
        PlayerSpec::Random { name } => Ok(Player::random(name.clone(), rng.gen())),
        PlayerSpec::Policy { name, path } => {
            let policy = LinearPolicy::load(path)
                .with_context(|| format!("Failed to load policy for player {}", name))?;
            tracing::debug!("Loaded policy {} from {}", name, path.display());
            Ok(Player::with_policy(name.clone(), policy))
        }
        PlayerSpec::Script { name, actions } => {
            Ok(Player::scripted(name.clone(), actions.clone()))
        }
    }
}

/// Build a roster in spec order
pub fn build_roster(specs: &[PlayerSpec], rng: &mut ChaCha8Rng) -> Result<Vec<Player>> {
    specs.iter().map(|spec| build_player(spec, rng)).collect()
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
