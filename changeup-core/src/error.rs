//! Errors for untrusted input (CLI arguments, scripted moves)

use crate::field::GOAL_COUNT;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("goal index {0} out of range (expected 0..{})", GOAL_COUNT)]
    GoalOutOfRange(usize),

    #[error("invalid action: {0}")]
    InvalidAction(String),
}
