use crate::gravity::GravityDirection;
use crate::physics::{CollisionResolver, Contact};

use super::{Body, PhysicsConfig};

/// Per-tick movement request. `direction` is -1, 0 or 1 along the lateral
/// axis (negative is left/up on screen); `jump` is already edge-triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub direction: i8,
    pub jump: bool,
}

impl MoveIntent {
    pub fn from_held(left: bool, right: bool, jump: bool) -> Self {
        let direction = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        Self { direction, jump }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyController {
    config: PhysicsConfig,
}

impl BodyController {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn step(
        &self,
        body: &mut Body,
        gravity: GravityDirection,
        intent: MoveIntent,
        resolver: &CollisionResolver,
        dt: f32,
    ) -> Contact {
        self.apply_gravity(body, gravity, dt);
        self.apply_lateral_input(body, gravity, intent.direction, dt);
        if intent.jump {
            self.try_jump(body, gravity);
        }
        resolver.move_body(body, gravity, dt)
    }

    pub fn apply_gravity(&self, body: &mut Body, gravity: GravityDirection, dt: f32) {
        let max = self.config.max_fall_speed;
        let v = gravity.axis().component_mut(&mut body.velocity);
        *v = (*v + self.config.gravity * gravity.gravity_sign() * dt).clamp(-max, max);
    }

    pub fn apply_lateral_input(&self, body: &mut Body, gravity: GravityDirection, direction: i8, dt: f32) {
        let v = gravity.lateral_axis().component_mut(&mut body.velocity);

        if direction != 0 {
            let max = self.config.max_move_speed;
            *v = (*v + self.config.move_acceleration * direction.signum() as f32 * dt).clamp(-max, max);
            return;
        }

        *v *= self.config.friction;
        if v.abs() < self.config.stop_epsilon {
            *v = 0.0;
        }
    }

    pub fn try_jump(&self, body: &mut Body, gravity: GravityDirection) -> bool {
        if !body.grounded {
            return false;
        }

        *gravity.axis().component_mut(&mut body.velocity) = -gravity.gravity_sign() * self.config.jump_speed;
        body.grounded = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::Rect;

    fn body() -> Body {
        Body::new(Vec2::new(100.0, 100.0), Vec2::new(24.0, 32.0))
    }

    #[test]
    fn intent_from_held_buttons() {
        assert_eq!(MoveIntent::from_held(true, false, false).direction, -1);
        assert_eq!(MoveIntent::from_held(false, true, false).direction, 1);
        assert_eq!(MoveIntent::from_held(true, true, false).direction, 0);
        assert_eq!(MoveIntent::from_held(false, false, true).direction, 0);
    }

    #[test]
    fn gravity_follows_direction() {
        let controller = BodyController::default();
        let dt = 1.0 / 60.0;
        for g in GravityDirection::ALL {
            let mut b = body();
            controller.apply_gravity(&mut b, g, dt);
            let along = g.axis().component(b.velocity) * g.gravity_sign();
            assert!(along > 0.0, "{g}");
            assert_eq!(g.lateral_axis().component(b.velocity), 0.0);
        }
    }

    #[test]
    fn friction_snaps_to_zero() {
        let controller = BodyController::default();
        let mut b = body();
        b.velocity.x = 200.0;

        for _ in 0..200 {
            controller.apply_lateral_input(&mut b, GravityDirection::Down, 0, 1.0 / 60.0);
        }

        assert_eq!(b.velocity.x, 0.0);
    }

    #[test]
    fn lateral_speed_is_capped() {
        let controller = BodyController::default();
        let mut b = body();
        for _ in 0..600 {
            controller.apply_lateral_input(&mut b, GravityDirection::Up, -1, 1.0 / 60.0);
        }
        assert_eq!(b.velocity.x, -controller.config().max_move_speed);
    }

    #[test]
    fn jump_requires_ground_and_opposes_gravity() {
        let controller = BodyController::default();
        let jump = controller.config().jump_speed;

        let mut airborne = body();
        assert!(!controller.try_jump(&mut airborne, GravityDirection::Down));
        assert_eq!(airborne.velocity, Vec2::ZERO);

        let mut b = body();
        b.grounded = true;
        assert!(controller.try_jump(&mut b, GravityDirection::Down));
        assert_eq!(b.velocity.y, -jump);
        assert!(!b.grounded);

        let mut b = body();
        b.grounded = true;
        assert!(controller.try_jump(&mut b, GravityDirection::Left));
        assert_eq!(b.velocity.x, jump);
    }

    #[test]
    fn resting_body_stays_grounded() {
        let controller = BodyController::default();
        let resolver = CollisionResolver::with_obstacles([Rect::new(0.0, 132.0, 400.0, 20.0)]);
        let mut b = body();

        for _ in 0..30 {
            controller.step(&mut b, GravityDirection::Down, MoveIntent::default(), &resolver, 1.0 / 60.0);
            assert!(b.grounded);
            assert_eq!(b.position.y, 100.0);
        }
    }

    proptest! {
        #[test]
        fn free_fall_never_exceeds_max_speed(g in 0usize..4, ticks in 1usize..400, dt in 0.001f32..0.05) {
            let gravity = GravityDirection::ALL[g];
            let controller = BodyController::default();
            let resolver = CollisionResolver::new();
            let max = controller.config().max_fall_speed;
            let mut b = body();
            let mut last = 0.0f32;

            for _ in 0..ticks {
                controller.step(&mut b, gravity, MoveIntent::default(), &resolver, dt);
                let along = gravity.axis().component(b.velocity) * gravity.gravity_sign();
                prop_assert!(along <= max);
                prop_assert!(along >= last);
                prop_assert!(!b.grounded);
                last = along;
            }

            if ticks as f32 * dt > max / controller.config().gravity + dt {
                prop_assert_eq!(last, max);
            }
        }
    }
}
