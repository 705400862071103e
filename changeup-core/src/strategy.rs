//! Players and the strategies that drive them

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::{Field, GOAL_COUNT};
use crate::goal::Color;
use crate::policy::{encode_inputs, first_max_index, DecisionPolicy, POLICY_OUTPUTS};

// ============================================================================
// ACTIONS
// ============================================================================

/// One move on the field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Drop a ball into the goal
    Score(usize),
    /// Pull the bottom ball out of the goal
    DeScore(usize),
}

impl Action {
    /// Map a policy output index: 0..=8 score, 9..=17 de-score goal `index - 9`.
    ///
    /// # Panics
    /// If `index` is not a policy output index.
    pub fn from_policy_index(index: usize) -> Self {
        assert!(
            index < POLICY_OUTPUTS,
            "policy output index {} out of range (expected 0..{})",
            index,
            POLICY_OUTPUTS
        );
        if index < GOAL_COUNT {
            Action::Score(index)
        } else {
            Action::DeScore(index - GOAL_COUNT)
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Score(goal) => write!(f, "score:{}", goal),
            Action::DeScore(goal) => write!(f, "descore:{}", goal),
        }
    }
}

impl FromStr for Action {
    type Err = CoreError;

    /// Parses `score:<goal>` or `descore:<goal>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, goal) = s
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidAction(s.to_string()))?;
        let goal: usize = goal
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidAction(s.to_string()))?;
        if goal >= GOAL_COUNT {
            return Err(CoreError::GoalOutOfRange(goal));
        }

        match kind.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Action::Score(goal)),
            "descore" | "de_score" => Ok(Action::DeScore(goal)),
            _ => Err(CoreError::InvalidAction(s.to_string())),
        }
    }
}

/// A move that was attempted, and whether it changed the field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub action: Action,
    pub applied: bool,
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Picks an action for `color` on a field
pub trait Strategy {
    /// Short label for reports
    fn kind(&self) -> &'static str;

    fn choose_action(&mut self, field: &Field, color: Color) -> Action;

    /// Choose an action and apply it. A failed action is a wasted move.
    fn make_move(&mut self, field: &mut Field, color: Color) -> MoveRecord {
        let action = self.choose_action(field, color);
        let applied = field.apply(action, color);
        MoveRecord {
            color,
            action,
            applied,
        }
    }
}

/// Scores into a uniformly random goal. Never retries a full goal.
pub struct RandomStrategy {
    rng: ChaCha8Rng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn kind(&self) -> &'static str {
        "random"
    }

    fn choose_action(&mut self, _field: &Field, _color: Color) -> Action {
        Action::Score(self.rng.gen_range(0..GOAL_COUNT))
    }
}

/// Lets a decision policy pick the action with the highest preference
pub struct PolicyStrategy<P> {
    policy: P,
}

impl<P: DecisionPolicy> PolicyStrategy<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }
}

impl<P: DecisionPolicy> Strategy for PolicyStrategy<P> {
    fn kind(&self) -> &'static str {
        "policy"
    }

    fn choose_action(&mut self, field: &Field, color: Color) -> Action {
        let inputs = encode_inputs(field, color);
        let outputs = self.policy.activate(&inputs);
        Action::from_policy_index(first_max_index(&outputs))
    }
}

/// Replays a fixed list of actions, starting over when it runs out
pub struct ScriptedStrategy {
    actions: Vec<Action>,
    next: usize,
}

impl ScriptedStrategy {
    /// # Panics
    /// If `actions` is empty.
    pub fn new(actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "a script needs at least one action");
        Self { actions, next: 0 }
    }
}

impl Strategy for ScriptedStrategy {
    fn kind(&self) -> &'static str {
        "script"
    }

    fn choose_action(&mut self, _field: &Field, _color: Color) -> Action {
        let action = self.actions[self.next];
        self.next = (self.next + 1) % self.actions.len();
        action
    }
}

// ============================================================================
// PLAYER
// ============================================================================

/// A named participant
pub struct Player {
    name: String,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    /// Random player with a fixed seed
    pub fn random(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, Box::new(RandomStrategy::with_seed(seed)))
    }

    /// Player driven by an externally built decision policy
    pub fn with_policy<P>(name: impl Into<String>, policy: P) -> Self
    where
        P: DecisionPolicy + 'static,
    {
        Self::new(name, Box::new(PolicyStrategy::new(policy)))
    }

    /// Player replaying `actions` in order
    pub fn scripted(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self::new(name, Box::new(ScriptedStrategy::new(actions)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.strategy.kind()
    }

    pub fn make_move(&mut self, field: &mut Field, color: Color) -> MoveRecord {
        self.strategy.make_move(field, color)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("kind", &self.strategy.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Slot;
    use crate::policy::POLICY_INPUTS;

    fn policy_preferring(index: usize) -> impl Fn(&[f64; POLICY_INPUTS]) -> [f64; POLICY_OUTPUTS] {
        move |_inputs| {
            let mut out = [0.0; POLICY_OUTPUTS];
            out[index] = 1.0;
            out
        }
    }

    #[test]
    fn test_action_from_policy_index() {
        assert_eq!(Action::from_policy_index(0), Action::Score(0));
        assert_eq!(Action::from_policy_index(8), Action::Score(8));
        assert_eq!(Action::from_policy_index(9), Action::DeScore(0));
        assert_eq!(Action::from_policy_index(17), Action::DeScore(8));
    }

    #[test]
    #[should_panic]
    fn test_action_from_policy_index_out_of_range() {
        Action::from_policy_index(18);
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("score:4".parse::<Action>().unwrap(), Action::Score(4));
        assert_eq!("descore:0".parse::<Action>().unwrap(), Action::DeScore(0));
        assert!(matches!("score:9".parse::<Action>(), Err(CoreError::GoalOutOfRange(9))));
        assert!("jump:1".parse::<Action>().is_err());
        assert!("score".parse::<Action>().is_err());
        assert_eq!(Action::DeScore(3).to_string(), "descore:3");
    }

    #[test]
    fn test_policy_max_at_nine_de_scores_goal_zero() {
        let mut field = Field::new();
        field.score(0, Color::Red);
        field.score(0, Color::Blue);

        let mut strategy = PolicyStrategy::new(policy_preferring(9));
        let record = strategy.make_move(&mut field, Color::Red);

        assert_eq!(record.action, Action::DeScore(0));
        assert!(record.applied);
        assert_eq!(field.goal(0).bottom(), Slot::Ball(Color::Blue));
        assert_eq!(field.goal(0).top(), Slot::Removed);
    }

    #[test]
    fn test_policy_scores_with_own_color() {
        let mut field = Field::new();
        let mut strategy = PolicyStrategy::new(policy_preferring(5));

        let record = strategy.make_move(&mut field, Color::Blue);
        assert_eq!(record.action, Action::Score(5));
        assert_eq!(field.goal(5).bottom(), Slot::Ball(Color::Blue));
    }

    #[test]
    fn test_policy_sees_color_and_descriptors() {
        // Score into goal 0 as red, de-score goal 0 as blue
        let policy = |inputs: &[f64; POLICY_INPUTS]| {
            let mut out = [0.0; POLICY_OUTPUTS];
            if inputs[0] > 0.0 {
                out[0] = 1.0;
            } else if inputs[1] > 0.0 {
                out[9] = 1.0;
            }
            out
        };
        let mut strategy = PolicyStrategy::new(policy);
        let mut field = Field::new();

        assert_eq!(strategy.choose_action(&field, Color::Blue), Action::Score(0));
        strategy.make_move(&mut field, Color::Red);
        assert_eq!(strategy.choose_action(&field, Color::Blue), Action::DeScore(0));
    }

    #[test]
    fn test_policy_ties_pick_first() {
        let policy = |_: &[f64; POLICY_INPUTS]| [0.5; POLICY_OUTPUTS];
        let mut strategy = PolicyStrategy::new(policy);
        assert_eq!(strategy.choose_action(&Field::new(), Color::Red), Action::Score(0));
    }

    #[test]
    fn test_policy_wasted_move_on_full_goal() {
        let mut field = Field::new();
        for _ in 0..3 {
            field.score(2, Color::Blue);
        }
        let mut strategy = PolicyStrategy::new(policy_preferring(2));

        let record = strategy.make_move(&mut field, Color::Red);
        assert!(!record.applied);
        assert_eq!(field.get_score().blue, 3);
    }

    #[test]
    fn test_random_strategy_only_scores() {
        let mut strategy = RandomStrategy::with_seed(7);
        let field = Field::new();
        for _ in 0..100 {
            match strategy.choose_action(&field, Color::Red) {
                Action::Score(goal) => assert!(goal < GOAL_COUNT),
                other => panic!("unexpected action {:?}", other),
            }
        }
    }

    #[test]
    fn test_random_strategy_deterministic_with_seed() {
        let mut a = RandomStrategy::with_seed(42);
        let mut b = RandomStrategy::with_seed(42);
        let field = Field::new();
        for _ in 0..20 {
            assert_eq!(
                a.choose_action(&field, Color::Blue),
                b.choose_action(&field, Color::Blue)
            );
        }
    }

    #[test]
    fn test_random_strategy_wastes_moves_when_full() {
        let mut field = Field::new();
        for goal in 0..GOAL_COUNT {
            for _ in 0..3 {
                field.score(goal, Color::Red);
            }
        }
        let before = field.clone();

        let mut strategy = RandomStrategy::with_seed(1);
        let record = strategy.make_move(&mut field, Color::Blue);
        assert!(!record.applied);
        assert_eq!(field, before);
    }

    #[test]
    fn test_player_constructors() {
        let mut random = Player::random("Foo", 3);
        assert_eq!(random.name(), "Foo");
        assert_eq!(random.kind(), "random");

        let mut field = Field::new();
        let record = random.make_move(&mut field, Color::Red);
        assert!(record.applied);
        assert_eq!(record.color, Color::Red);

        let policy_player = Player::with_policy("NEAT-1", policy_preferring(4));
        assert_eq!(policy_player.kind(), "policy");
        assert!(format!("{:?}", policy_player).contains("NEAT-1"));
    }

    #[test]
    fn test_scripted_strategy_cycles() {
        let mut strategy = ScriptedStrategy::new(vec![Action::Score(4), Action::DeScore(4)]);
        let mut field = Field::new();

        let first = strategy.make_move(&mut field, Color::Red);
        let second = strategy.make_move(&mut field, Color::Red);
        assert_eq!(first.action, Action::Score(4));
        assert_eq!(second.action, Action::DeScore(4));
        assert_eq!(field.goal(4).top(), Slot::Removed);

        // Script starts over; goal 4 is now blocked
        let third = strategy.make_move(&mut field, Color::Red);
        assert_eq!(third.action, Action::Score(4));
        assert!(!third.applied);
    }

    #[test]
    fn test_scripted_player_from_parsed_actions() {
        let actions: Vec<Action> = "score:0,score:1,descore:0"
            .split(',')
            .map(str::parse)
            .collect::<Result<_, _>>()
            .unwrap();
        let mut player = Player::scripted("Replay", actions);
        assert_eq!(player.kind(), "script");

        let mut field = Field::new();
        for _ in 0..3 {
            player.make_move(&mut field, Color::Blue);
        }
        assert_eq!(field.goal(0).top(), Slot::Removed);
        assert_eq!(field.goal(1).bottom(), Slot::Ball(Color::Blue));
    }

    #[test]
    #[should_panic(expected = "at least one action")]
    fn test_empty_script_panics() {
        ScriptedStrategy::new(Vec::new());
    }
}
