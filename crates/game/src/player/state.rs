use glam::Vec2;

use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }
}
