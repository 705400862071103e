//! ChangeUp Core - Game engine
//!
//! This crate provides the core game logic for ChangeUp:
//! - Goals (three-slot stacks filled bottom-up, drained from the bottom)
//! - The 3x3 field with ball and line scoring
//! - Strategies and players: random, policy-driven, and scripted
//! - The decision policy seam used by external trainers

pub mod error;
pub mod goal;
pub mod field;
pub mod policy;
pub mod strategy;

// Re-exports for convenient access
pub use error::CoreError;
pub use goal::{Color, Goal, Slot, GOAL_CAPACITY};
pub use field::{Field, Score, GOAL_COUNT, LINE_BONUS, WINNING_LINES};
pub use policy::{encode_inputs, first_max_index, DecisionPolicy, POLICY_INPUTS, POLICY_OUTPUTS};
pub use strategy::{Action, MoveRecord, Player, PolicyStrategy, RandomStrategy, ScriptedStrategy, Strategy};
