//! A single goal: a stack of three ball slots

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of slots in a goal
pub const GOAL_CAPACITY: usize = 3;

/// Ball color. Red always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    /// Value of the color indicator fed to decision policies
    pub fn indicator(self) -> f64 {
        match self {
            Color::Red => 1.0,
            Color::Blue => -1.0,
        }
    }

    /// Digit used in a goal descriptor
    fn descriptor_digit(self) -> u32 {
        match self {
            Color::Red => 2,
            Color::Blue => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Blue => write!(f, "Blue"),
        }
    }
}

/// Contents of one slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Empty,
    Ball(Color),
    /// Written into `top` by [`Goal::de_score`]. Not the same as `Empty`.
    Removed,
}

impl Slot {
    pub fn is_empty(self) -> bool {
        self == Slot::Empty
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Slot::Ball(color) => Some(color),
            Slot::Empty | Slot::Removed => None,
        }
    }

    /// Single-character glyph for the board dump
    pub fn glyph(self) -> char {
        match self {
            Slot::Empty => '.',
            Slot::Ball(Color::Red) => 'R',
            Slot::Ball(Color::Blue) => 'B',
            Slot::Removed => '-',
        }
    }

    fn descriptor_digit(self) -> u32 {
        self.color().map_or(0, Color::descriptor_digit)
    }
}

/// A goal holding up to three balls, filled bottom-up
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    bottom: Slot,
    middle: Slot,
    top: Slot,
}

impl Goal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bottom(&self) -> Slot {
        self.bottom
    }

    pub fn middle(&self) -> Slot {
        self.middle
    }

    pub fn top(&self) -> Slot {
        self.top
    }

    /// Slots in bottom, middle, top order
    pub fn slots(&self) -> [Slot; GOAL_CAPACITY] {
        [self.bottom, self.middle, self.top]
    }

    /// Drop a ball into the goal.
    ///
    /// Returns false without touching the goal when `top` is occupied. A
    /// `Removed` top counts as occupied, so a goal that has been de-scored
    /// never accepts another ball.
    pub fn score(&mut self, color: Color) -> bool {
        if !self.top.is_empty() {
            return false;
        }

        let ball = Slot::Ball(color);
        if self.bottom.is_empty() {
            self.bottom = ball;
        } else if self.middle.is_empty() {
            self.middle = ball;
        } else {
            self.top = ball;
        }

        true
    }

    /// Pull the bottom ball out; the rest slide down and `top` becomes
    /// [`Slot::Removed`].
    ///
    /// There is no "already empty" check: de-scoring an empty goal still
    /// succeeds and marks it. Trained policies may rely on this, so it
    /// always returns true.
    pub fn de_score(&mut self) -> bool {
        self.bottom = self.middle;
        self.middle = self.top;
        self.top = Slot::Removed;

        true
    }

    /// Color of the topmost ball, if any.
    ///
    /// Looks at the first non-empty slot from the top. When that slot is
    /// `Removed` nobody owns the goal, even if balls sit below it.
    pub fn owned_by(&self) -> Option<Color> {
        if !self.top.is_empty() {
            self.top.color()
        } else if !self.middle.is_empty() {
            self.middle.color()
        } else {
            self.bottom.color()
        }
    }

    /// Encode the goal as `top, middle, bottom` base-10 digits scaled into [0, 1)
    pub fn descriptor(&self) -> f64 {
        let code = 100 * self.top.descriptor_digit()
            + 10 * self.middle.descriptor_digit()
            + self.bottom.descriptor_digit();
        code as f64 / 1000.0
    }

    /// Ball count as `(red, blue)`
    pub fn get_score(&self) -> (u32, u32) {
        self.slots()
            .iter()
            .fold((0, 0), |(red, blue), slot| match slot.color() {
                Some(Color::Red) => (red + 1, blue),
                Some(Color::Blue) => (red, blue + 1),
                None => (red, blue),
            })
    }
}
