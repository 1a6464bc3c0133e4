use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::gravity::GravityDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub warp_margin: f32,
    pub warp_cooldown: f32,
    pub kill_margin: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            warp_margin: 4.0,
            warp_cooldown: 0.20,
            kill_margin: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Gravity after leaving through this edge.
    pub fn gravity(self) -> GravityDirection {
        match self {
            Edge::Left => GravityDirection::Left,
            Edge::Right => GravityDirection::Right,
            Edge::Top => GravityDirection::Up,
            Edge::Bottom => GravityDirection::Down,
        }
    }

    /// Where a body of `size` re-enters after leaving through this edge:
    /// just inside the opposite edge, keeping the cross-axis coordinate.
    pub fn reentry(self, body: &Rect, bounds: Vec2, margin: f32) -> Vec2 {
        let mut pos = body.pos;
        match self {
            Edge::Left => pos.x = bounds.x - body.size.x - margin,
            Edge::Right => pos.x = margin,
            Edge::Top => pos.y = bounds.y - body.size.y - margin,
            Edge::Bottom => pos.y = margin,
        }
        pos
    }
}

/// The edge the body has fully left through, checked left, right, top,
/// bottom in that order.
pub fn exited_edge(body: &Rect, bounds: Vec2) -> Option<Edge> {
    if body.right() <= 0.0 {
        Some(Edge::Left)
    } else if body.left() >= bounds.x {
        Some(Edge::Right)
    } else if body.bottom() <= 0.0 {
        Some(Edge::Top)
    } else if body.top() >= bounds.y {
        Some(Edge::Bottom)
    } else {
        None
    }
}

pub fn beyond_kill_plane(position: Vec2, bounds: Vec2, margin: f32) -> bool {
    position.x < -margin
        || position.y < -margin
        || position.x > bounds.x + margin
        || position.y > bounds.y + margin
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warp {
    pub edge: Edge,
    pub gravity: GravityDirection,
    pub position: Vec2,
    pub used_fallback: bool,
}
