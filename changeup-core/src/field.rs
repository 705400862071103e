//! The 3x3 field of goals, scoring, and board dump

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::goal::{Color, Goal, Slot};
use crate::strategy::Action;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Goals on the field, row-major over a 3x3 layout
pub const GOAL_COUNT: usize = 9;

/// Side length of the field
pub const FIELD_SIDE: usize = 3;

/// Bonus for owning every goal of a line
pub const LINE_BONUS: u32 = 6;

/// Rows, columns, and diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// ============================================================================
// SCORE
// ============================================================================

/// Points for both colors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub red: u32,
    pub blue: u32,
}

impl Score {
    pub const fn new(red: u32, blue: u32) -> Self {
        Self { red, blue }
    }

    /// Color with strictly more points (None on a tie)
    pub fn leader(&self) -> Option<Color> {
        match self.red.cmp(&self.blue) {
            std::cmp::Ordering::Greater => Some(Color::Red),
            std::cmp::Ordering::Less => Some(Color::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.red + self.blue
    }

    pub fn max(&self) -> u32 {
        self.red.max(self.blue)
    }
}

impl From<(u32, u32)> for Score {
    fn from((red, blue): (u32, u32)) -> Self {
        Self { red, blue }
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// Nine goals addressed 0..=8
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    goals: [Goal; GOAL_COUNT],
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// If `index` is not a goal index.
    pub fn goal(&self, index: usize) -> &Goal {
        &self.goals[checked_index(index)]
    }

    pub fn goals(&self) -> &[Goal; GOAL_COUNT] {
        &self.goals
    }

    /// Drop a ball of `color` into goal `index`. False if the goal is full.
    ///
    /// # Panics
    /// If `index` is not a goal index.
    pub fn score(&mut self, index: usize, color: Color) -> bool {
        self.goals[checked_index(index)].score(color)
    }

    /// Remove the bottom ball of goal `index`.
    ///
    /// # Panics
    /// If `index` is not a goal index.
    pub fn de_score(&mut self, index: usize) -> bool {
        self.goals[checked_index(index)].de_score()
    }

    /// Apply an action on behalf of `color`
    pub fn apply(&mut self, action: Action, color: Color) -> bool {
        match action {
            Action::Score(index) => self.score(index, color),
            Action::DeScore(index) => self.de_score(index),
        }
    }

    /// One point per ball, plus [`LINE_BONUS`] for every line owned outright
    pub fn get_score(&self) -> Score {
        let (mut red, mut blue) = self
            .goals
            .iter()
            .map(Goal::get_score)
            .fold((0, 0), |(r, b), (gr, gb)| (r + gr, b + gb));

        red += LINE_BONUS * self.lines_owned_by(Color::Red) as u32;
        blue += LINE_BONUS * self.lines_owned_by(Color::Blue) as u32;

        Score::new(red, blue)
    }

    /// Number of winning lines where every goal is owned by `color`
    pub fn lines_owned_by(&self, color: Color) -> usize {
        WINNING_LINES
            .iter()
            .filter(|line| line.iter().all(|&i| self.goals[i].owned_by() == Some(color)))
            .count()
    }

    /// Goal descriptors in goal order
    pub fn get_descriptors(&self) -> [f64; GOAL_COUNT] {
        std::array::from_fn(|i| self.goals[i].descriptor())
    }
}

fn checked_index(index: usize) -> usize {
    assert!(
        index < GOAL_COUNT,
        "goal index {} out of range (expected 0..{})",
        index,
        GOAL_COUNT
    );
    index
}

// ============================================================================
// BOARD DUMP
// ============================================================================

const BORDER: &str = "+-----------------------+";

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BORDER)?;
        for row in 0..FIELD_SIDE {
            let goals = &self.goals[row * FIELD_SIDE..(row + 1) * FIELD_SIDE];
            for level in [Goal::top, Goal::middle, Goal::bottom] {
                write_level(f, goals, level)?;
            }
            if row < FIELD_SIDE - 1 {
                writeln!(f, "|                       |")?;
            }
        }
        writeln!(f, "{}", BORDER)?;

        let score = self.get_score();
        write!(f, "Red = {:02}        Blue = {:02}", score.red, score.blue)
    }
}

fn write_level(f: &mut fmt::Formatter<'_>, goals: &[Goal], level: fn(&Goal) -> Slot) -> fmt::Result {
    writeln!(
        f,
        "|{}          {}          {}|",
        level(&goals[0]).glyph(),
        level(&goals[1]).glyph(),
        level(&goals[2]).glyph()
    )
}
