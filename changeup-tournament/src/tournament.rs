//! Tournament execution - round-robin over a roster
//!
//! Level 1 - Orchestration and Level 2 - Phases

use changeup_core::{Color, Player, Score};
use serde::Serialize;

use crate::config::{ConfigError, TournamentConfig};
use crate::match_play::play_match;

/// Aggregate statistics of one tournament call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TournamentResult {
    /// Wins per player, index-aligned with the roster
    pub wins: Vec<u32>,
    /// Highest single-color total seen in any match
    pub high_score: u32,
    /// Sum of both totals over every match
    pub total_score: u64,
    /// Matches played
    pub matches_played: u32,
}

impl TournamentResult {
    /// Empty result for a roster of `players`
    pub fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            ..Default::default()
        }
    }

    /// Average of both totals per match
    pub fn average_score(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.matches_played as f64
        }
    }

    /// Index of the player with the most wins (lowest index on ties)
    pub fn leader(&self) -> Option<usize> {
        let best = *self.wins.iter().max()?;
        self.wins.iter().position(|&w| w == best)
    }

    /// Matches that ended without a winner
    pub fn ties(&self) -> u32 {
        self.matches_played - self.wins.iter().sum::<u32>()
    }

    /// Fold a finished match into the statistics
    pub fn record_match(&mut self, red: usize, blue: usize, score: &Score) {
        self.matches_played += 1;
        self.total_score += u64::from(score.total());
        self.high_score = self.high_score.max(score.max());

        match score.leader() {
            Some(Color::Red) => self.wins[red] += 1,
            Some(Color::Blue) => self.wins[blue] += 1,
            None => {}
        }
    }

    /// Combine with another result over the same roster
    pub fn combine(&self, other: &TournamentResult) -> TournamentResult {
        let len = self.wins.len().max(other.wins.len());
        let wins = (0..len)
            .map(|i| self.wins.get(i).copied().unwrap_or(0) + other.wins.get(i).copied().unwrap_or(0))
            .collect();

        TournamentResult {
            wins,
            high_score: self.high_score.max(other.high_score),
            total_score: self.total_score + other.total_score,
            matches_played: self.matches_played + other.matches_played,
        }
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin tournament (Level 1 orchestration)
///
/// Every ordered pair of distinct players meets once per round, so each
/// pair plays twice with colors swapped. Each match gets a fresh field.
///
/// # Arguments
/// * `players` - Roster; random players advance their RNG as they play
/// * `config` - Tournament configuration, rejected if it has zero rounds
pub fn run_tournament(
    players: &mut [Player],
    config: &TournamentConfig,
) -> Result<TournamentResult, ConfigError> {
    config.validate()?;
    let mut result = TournamentResult::new(players.len());

    if players.len() < 2 {
        tracing::warn!("Tournament needs at least two players, got {}", players.len());
        return Ok(result);
    }

    let pairings = generate_round_robin_pairings(players.len());
    for round in 0..config.rounds {
        play_round(players, &pairings, config, &mut result);
        tracing::debug!(
            "Round {} done: {} matches, high score {}",
            round + 1,
            result.matches_played,
            result.high_score
        );
    }

    Ok(result)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Play every pairing once
fn play_round(
    players: &mut [Player],
    pairings: &[(usize, usize)],
    config: &TournamentConfig,
    result: &mut TournamentResult,
) {
    for &(i, j) in pairings {
        let (red, blue) = pair_mut(players, i, j);
        let outcome = play_match(red, blue);

        tracing::debug!(
            "Game {} {} - {} {}",
            red.name(),
            outcome.score.red,
            blue.name(),
            outcome.score.blue
        );
        if config.show_boards {
            tracing::debug!("\n{}", outcome.field);
        }

        result.record_match(i, j, &outcome.score);
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// All ordered pairs of distinct indices, red index first
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::with_capacity(n * n.saturating_sub(1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                pairings.push((i, j));
            }
        }
    }
    pairings
}

/// Borrow two distinct players mutably
fn pair_mut(players: &mut [Player], i: usize, j: usize) -> (&mut Player, &mut Player) {
    assert_ne!(i, j, "a player cannot meet itself");
    if i < j {
        let (left, right) = players.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
