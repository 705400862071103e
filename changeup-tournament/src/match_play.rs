//! Match play - one fixed-length game between two players
//!
//! Level 2 - Phase-level implementation

use changeup_core::{Color, Field, MoveRecord, Player, Score};

/// Rounds per match; each round is one red move then one blue move
pub const ROUNDS_PER_MATCH: usize = 10;

/// Result of a single match
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    /// Final board, kept for display
    pub field: Field,
    /// Final score
    pub score: Score,
    /// Every attempted move in order
    pub moves: Vec<MoveRecord>,
}

impl MatchOutcome {
    /// Color with the strictly higher total (None on a tie)
    pub fn winner(&self) -> Option<Color> {
        self.score.leader()
    }

    /// Moves that left the field unchanged
    pub fn wasted_moves(&self) -> usize {
        self.moves.iter().filter(|m| !m.applied).count()
    }

    /// Moves attempted by one color
    pub fn moves_by(&self, color: Color) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter().filter(move |m| m.color == color)
    }

    /// Higher of the two totals
    pub fn high_score(&self) -> u32 {
        self.score.max()
    }

    /// Sum of both totals
    pub fn total_points(&self) -> u32 {
        self.score.total()
    }
}

/// Play one match on a fresh field (Level 2 phase)
///
/// Always runs all [`ROUNDS_PER_MATCH`] rounds; wasted moves still count.
pub fn play_match(red: &mut Player, blue: &mut Player) -> MatchOutcome {
    let mut field = Field::new();
    let mut moves = Vec::with_capacity(2 * ROUNDS_PER_MATCH);

    for _ in 0..ROUNDS_PER_MATCH {
        moves.push(red.make_move(&mut field, Color::Red));
        moves.push(blue.make_move(&mut field, Color::Blue));
    }

    let score = field.get_score();
    MatchOutcome {
        field,
        score,
        moves,
    }
}
