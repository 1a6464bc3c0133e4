use glam::Vec2;

use crate::geometry::Rect;
use crate::gravity::{Axis, GravityDirection};
use crate::player::Body;

/// Outcome of one move-and-collide step. Hit values are the sign of travel
/// along the axis when the hit happened.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    pub lateral: Option<f32>,
    pub gravity_axis: Option<f32>,
}

impl Contact {
    pub fn landed(&self, gravity: GravityDirection) -> bool {
        self.gravity_axis == Some(gravity.gravity_sign())
    }
}

/// Per-tick obstacle set: static platforms plus the current positions of
/// moving platforms and closed doors.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    obstacles: Vec<Rect>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstacles(obstacles: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            obstacles: obstacles.into_iter().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn push(&mut self, rect: Rect) {
        self.obstacles.push(rect);
    }

    pub fn extend(&mut self, rects: impl IntoIterator<Item = Rect>) {
        self.obstacles.extend(rects);
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn overlaps_any(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.overlaps(rect))
    }

    /// Integrates `body.velocity * dt` one axis at a time, lateral axis
    /// first, and updates `body.grounded` from the gravity-axis pass.
    pub fn move_body(&self, body: &mut Body, gravity: GravityDirection, dt: f32) -> Contact {
        let mut rect = body.rect();
        let mut velocity = body.velocity;

        let lateral_axis = gravity.lateral_axis();
        let gravity_axis = gravity.axis();

        let lateral = self.sweep_axis(&mut rect, &mut velocity, lateral_axis, dt);
        let vertical = self.sweep_axis(&mut rect, &mut velocity, gravity_axis, dt);

        let contact = Contact {
            lateral,
            gravity_axis: vertical,
        };

        body.position = rect.pos;
        body.velocity = velocity;
        body.grounded = contact.landed(gravity);

        contact
    }

    fn sweep_axis(&self, rect: &mut Rect, velocity: &mut Vec2, axis: Axis, dt: f32) -> Option<f32> {
        let delta = axis.component(*velocity) * dt;
        if delta == 0.0 {
            return None;
        }

        *axis.component_mut(&mut rect.pos) += delta;

        let direction = delta.signum();
        let mut hit = None;

        for obstacle in &self.obstacles {
            if !obstacle.overlaps(rect) {
                continue;
            }

            let clamped = match (axis, direction > 0.0) {
                (Axis::Horizontal, true) => obstacle.left() - rect.size.x,
                (Axis::Horizontal, false) => obstacle.right(),
                (Axis::Vertical, true) => obstacle.top() - rect.size.y,
                (Axis::Vertical, false) => obstacle.bottom(),
            };
            *axis.component_mut(&mut rect.pos) = clamped;
            hit = Some(direction);
        }

        if hit.is_some() {
            *axis.component_mut(velocity) = 0.0;
        }

        hit
    }
}
