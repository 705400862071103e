//! Decision policy seam
//!
//! A decision policy is built and trained elsewhere. The engine only needs
//! to feed it a board encoding and read back action preferences.

use crate::field::{Field, GOAL_COUNT};
use crate::goal::Color;

/// Inputs: color indicator followed by the nine goal descriptors
pub const POLICY_INPUTS: usize = 1 + GOAL_COUNT;

/// Outputs: nine score actions followed by nine de-score actions
pub const POLICY_OUTPUTS: usize = 2 * GOAL_COUNT;

/// Maps a board encoding to one preference value per action
pub trait DecisionPolicy {
    fn activate(&self, inputs: &[f64; POLICY_INPUTS]) -> [f64; POLICY_OUTPUTS];
}

impl<F> DecisionPolicy for F
where
    F: Fn(&[f64; POLICY_INPUTS]) -> [f64; POLICY_OUTPUTS],
{
    fn activate(&self, inputs: &[f64; POLICY_INPUTS]) -> [f64; POLICY_OUTPUTS] {
        self(inputs)
    }
}

/// Build the policy input vector for `color` on `field`
pub fn encode_inputs(field: &Field, color: Color) -> [f64; POLICY_INPUTS] {
    let descriptors = field.get_descriptors();
    let mut inputs = [0.0; POLICY_INPUTS];
    inputs[0] = color.indicator();
    inputs[1..].copy_from_slice(&descriptors);
    inputs
}

/// Index of the largest output; the first one wins ties.
///
/// NaN never compares greater, so it is only picked if it sits at index 0
/// and nothing beats it.
pub fn first_max_index(outputs: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in outputs.iter().enumerate().skip(1) {
        if value > outputs[best] {
            best = i;
        }
    }
    best
}
