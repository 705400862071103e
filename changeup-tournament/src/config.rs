//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use std::path::PathBuf;
use std::str::FromStr;

use changeup_core::{Action, CoreError};

/// Errors from user-supplied tournament settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tournament needs at least one round")]
    ZeroRounds,

    #[error("invalid player spec '{0}' (expected random:<name>, policy:<name>=<file> or script:<name>=<actions>)")]
    InvalidPlayerSpec(String),

    #[error("unknown strategy '{0}' (expected random, policy or script)")]
    UnknownStrategy(String),

    #[error("bad scripted move: {0}")]
    ScriptedMove(#[from] CoreError),
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Times the whole round-robin is repeated
    pub rounds: usize,
    /// Log every final board at debug level
    pub show_boards: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            show_boards: false,
        }
    }
}

impl TournamentConfig {
    /// Create config repeating the round-robin `rounds` times
    pub fn with_rounds(rounds: usize) -> Self {
        Self {
            rounds,
            ..Default::default()
        }
    }

    /// Log final boards
    pub fn show_boards(mut self, show: bool) -> Self {
        self.show_boards = show;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }
}

/// Configuration for one generation of genome evaluation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FitnessConfig {
    /// Round-robin repetitions per generation
    pub rounds: usize,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self { rounds: 1 }
    }
}

impl FitnessConfig {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    pub(crate) fn tournament_config(&self) -> TournamentConfig {
        TournamentConfig::with_rounds(self.rounds)
    }
}

/// A roster entry as written on the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerSpec {
    /// `random:<name>`
    Random { name: String },
    /// `policy:<name>=<weights file>`
    Policy { name: String, path: PathBuf },
    /// `script:<name>=score:4,descore:4,...`
    Script { name: String, actions: Vec<Action> },
}

impl PlayerSpec {
    pub fn name(&self) -> &str {
        match self {
            PlayerSpec::Random { name }
            | PlayerSpec::Policy { name, .. }
            | PlayerSpec::Script { name, .. } => name,
        }
    }
}

impl FromStr for PlayerSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPlayerSpec(s.to_string());

        let (kind, rest) = s.split_once(':').ok_or_else(invalid)?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "random" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(invalid());
                }
                Ok(PlayerSpec::Random {
                    name: name.to_string(),
                })
            }
            "policy" => {
                let (name, path) = rest.split_once('=').ok_or_else(invalid)?;
                let (name, path) = (name.trim(), path.trim());
                if name.is_empty() || path.is_empty() {
                    return Err(invalid());
                }
                Ok(PlayerSpec::Policy {
                    name: name.to_string(),
                    path: PathBuf::from(path),
                })
            }
            "script" => {
                let (name, script) = rest.split_once('=').ok_or_else(invalid)?;
                let name = name.trim();
                if name.is_empty() || script.trim().is_empty() {
                    return Err(invalid());
                }
                let actions = script
                    .split(',')
                    .map(str::parse)
                    .collect::<Result<Vec<Action>, CoreError>>()?;
                Ok(PlayerSpec::Script {
                    name: name.to_string(),
                    actions,
                })
            }
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}
