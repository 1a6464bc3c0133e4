use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Platform that ping-pongs between `start` and `end` at a fixed speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingObstacle {
    pub rect: Rect,
    pub start: Vec2,
    pub end: Vec2,
    pub speed: f32,
    pub forward: bool,
}

impl MovingObstacle {
    pub const ARRIVE_DISTANCE: f32 = 0.5;

    /// Starts at `rect.pos` heading toward `end`.
    pub fn new(rect: Rect, end: Vec2, speed: f32) -> Self {
        Self {
            start: rect.pos,
            rect,
            end,
            speed,
            forward: true,
        }
    }

    pub fn target(&self) -> Vec2 {
        if self.forward { self.end } else { self.start }
    }

    pub fn update(&mut self, dt: f32) {
        let to_target = self.target() - self.rect.pos;
        let distance = to_target.length();

        if distance < Self::ARRIVE_DISTANCE {
            self.forward = !self.forward;
            return;
        }

        let step = (self.speed * dt).min(distance);
        self.rect.pos += to_target / distance * step;
    }
}
