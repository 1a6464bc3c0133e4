use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The cardinal direction the simulation currently treats as "down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn component_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::Horizontal => &mut v.x,
            Axis::Vertical => &mut v.y,
        }
    }
}

impl GravityDirection {
    pub const ALL: [GravityDirection; 4] = [
        GravityDirection::Down,
        GravityDirection::Up,
        GravityDirection::Left,
        GravityDirection::Right,
    ];

    /// Screen coordinates: +y points down.
    pub fn signs(self) -> (i8, i8) {
        match self {
            GravityDirection::Down => (0, 1),
            GravityDirection::Up => (0, -1),
            GravityDirection::Left => (-1, 0),
            GravityDirection::Right => (1, 0),
        }
    }

    pub fn x_sign(self) -> i8 {
        self.signs().0
    }

    pub fn y_sign(self) -> i8 {
        self.signs().1
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, GravityDirection::Down | GravityDirection::Up)
    }

    pub fn axis(self) -> Axis {
        if self.is_vertical() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    pub fn lateral_axis(self) -> Axis {
        self.axis().other()
    }

    /// Sign of gravity along its own axis.
    pub fn gravity_sign(self) -> f32 {
        let (x, y) = self.signs();
        (x + y) as f32
    }

    pub fn index(self) -> usize {
        match self {
            GravityDirection::Down => 0,
            GravityDirection::Up => 1,
            GravityDirection::Left => 2,
            GravityDirection::Right => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GravityDirection::Down => "DOWN",
            GravityDirection::Up => "UP",
            GravityDirection::Left => "LEFT",
            GravityDirection::Right => "RIGHT",
        }
    }
}

impl fmt::Display for GravityDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gravity direction `{0}`")]
pub struct UnknownGravity(pub String);

impl FromStr for GravityDirection {
    type Err = UnknownGravity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GravityDirection::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| UnknownGravity(s.to_string()))
    }
}
