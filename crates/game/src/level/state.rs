use glam::Vec2;

use crate::entities::Checkpoint;
use crate::geometry::Rect;
use crate::gravity::GravityDirection;
use crate::physics::CollisionResolver;
use crate::player::Body;

use super::transition::{TransitionConfig, Warp, exited_edge};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnAnchor {
    pub position: Vec2,
    pub gravity: GravityDirection,
}

/// Per-load transition state. Created on level load and thrown away on the
/// next load or reload.
#[derive(Debug, Clone)]
pub struct LevelRuntimeState {
    gravity: GravityDirection,
    anchor: RespawnAnchor,
    safe_positions: [Option<Vec2>; 4],
    warp_cooldown: f32,
    deaths: u32,
}

impl LevelRuntimeState {
    pub fn new(spawn: Vec2, gravity: GravityDirection) -> Self {
        Self {
            gravity,
            anchor: RespawnAnchor {
                position: spawn,
                gravity,
            },
            safe_positions: [Some(spawn); 4],
            warp_cooldown: 0.0,
            deaths: 0,
        }
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    pub fn anchor(&self) -> RespawnAnchor {
        self.anchor
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn warp_cooldown(&self) -> f32 {
        self.warp_cooldown
    }

    pub fn safe_position(&self, gravity: GravityDirection) -> Option<Vec2> {
        self.safe_positions[gravity.index()]
    }

    pub fn record_grounded(&mut self, body: &Body) {
        if body.grounded {
            self.safe_positions[self.gravity.index()] = Some(body.position);
        }
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.warp_cooldown = (self.warp_cooldown - dt).max(0.0);
    }

    /// `solids` is the static platform set; re-entry inside one falls back
    /// to the last grounded position recorded for the new gravity.
    pub fn try_warp(
        &mut self,
        body: &mut Body,
        bounds: Vec2,
        solids: &CollisionResolver,
        config: &TransitionConfig,
    ) -> Option<Warp> {
        if self.warp_cooldown > 0.0 {
            return None;
        }

        let rect = body.rect();
        let edge = exited_edge(&rect, bounds)?;
        let gravity = edge.gravity();
        let target = edge.reentry(&rect, bounds, config.warp_margin);

        let mut used_fallback = false;
        let mut position = target;
        let mut landing = rect;
        landing.pos = target;
        if solids.overlaps_any(&landing) {
            position = self.safe_position(gravity).unwrap_or(target);
            used_fallback = true;
        }

        body.teleport(position);
        body.grounded = false;
        self.gravity = gravity;
        self.warp_cooldown = config.warp_cooldown;

        log::debug!(
            "warped through {:?} edge to {:?}, gravity {}{}",
            edge,
            position,
            gravity,
            if used_fallback { " (fallback)" } else { "" }
        );

        Some(Warp {
            edge,
            gravity,
            position,
            used_fallback,
        })
    }

    /// Activates the first untouched checkpoint the body reaches and moves
    /// the anchor so the body respawns centred on it. When the centred rect
    /// would sit inside a static platform, the body's current position is
    /// used instead.
    pub fn activate_checkpoint(
        &mut self,
        checkpoints: &mut [Checkpoint],
        body: &Body,
        solids: &CollisionResolver,
    ) -> Option<usize> {
        let rect = body.rect();
        let index = checkpoints.iter_mut().position(|cp| cp.try_activate(&rect))?;

        let centred = checkpoints[index].position - body.half_extents();
        let position = if solids.overlaps_any(&Rect::from_pos_size(centred, body.size)) {
            body.position
        } else {
            centred
        };

        self.anchor = RespawnAnchor {
            position,
            gravity: self.gravity,
        };
        log::debug!("checkpoint {} activated, anchor {:?}", index, self.anchor);

        Some(index)
    }

    pub fn respawn(&mut self, body: &mut Body) {
        body.teleport(self.anchor.position);
        body.grounded = false;
        self.gravity = self.anchor.gravity;
        self.warp_cooldown = 0.0;
        self.deaths += 1;
        log::debug!("respawned at {:?} (death {})", self.anchor.position, self.deaths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(960.0, 540.0);

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(20.0, 30.0))
    }

    #[test]
    fn spawn_seeds_every_gravity() {
        let state = LevelRuntimeState::new(Vec2::new(10.0, 20.0), GravityDirection::Down);
        for g in GravityDirection::ALL {
            assert_eq!(state.safe_position(g), Some(Vec2::new(10.0, 20.0)));
        }
    }

    #[test]
    fn grounded_position_recorded_for_current_gravity() {
        let mut state = LevelRuntimeState::new(Vec2::ZERO, GravityDirection::Down);
        let mut body = body_at(50.0, 60.0);

        state.record_grounded(&body);
        assert_eq!(state.safe_position(GravityDirection::Down), Some(Vec2::ZERO));

        body.grounded = true;
        state.record_grounded(&body);
        assert_eq!(state.safe_position(GravityDirection::Down), Some(Vec2::new(50.0, 60.0)));
        assert_eq!(state.safe_position(GravityDirection::Up), Some(Vec2::ZERO));
    }

    #[test]
    fn warp_left_reenters_right_with_left_gravity() {
        let mut state = LevelRuntimeState::new(Vec2::ZERO, GravityDirection::Down);
        let config = TransitionConfig::default();
        let mut body = body_at(-25.0, 200.0);
        body.velocity = Vec2::new(-300.0, 50.0);

        let warp = state
            .try_warp(&mut body, BOUNDS, &CollisionResolver::new(), &config)
            .unwrap();

        assert_eq!(warp.gravity, GravityDirection::Left);
        assert!(!warp.used_fallback);
        assert_eq!(body.position, Vec2::new(960.0 - 20.0 - config.warp_margin, 200.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(state.gravity(), GravityDirection::Left);
        assert_eq!(state.warp_cooldown(), config.warp_cooldown);
    }

    #[test]
    fn cooldown_blocks_repeat_warps() {
        let mut state = LevelRuntimeState::new(Vec2::ZERO, GravityDirection::Down);
        let config = TransitionConfig::default();
        let solids = CollisionResolver::new();
        let mut body = body_at(-25.0, 200.0);

        assert!(state.try_warp(&mut body, BOUNDS, &solids, &config).is_some());

        body.position = Vec2::new(-25.0, 200.0);
        state.tick_cooldown(0.1);
        assert!(state.try_warp(&mut body, BOUNDS, &solids, &config).is_none());
        assert_eq!(body.position, Vec2::new(-25.0, 200.0));

        state.tick_cooldown(0.1);
        assert_eq!(state.warp_cooldown(), 0.0);
        assert!(state.try_warp(&mut body, BOUNDS, &solids, &config).is_some());
    }

    #[test]
    fn warp_into_wall_uses_safe_position() {
        let spawn = Vec2::new(100.0, 100.0);
        let mut state = LevelRuntimeState::new(spawn, GravityDirection::Down);
        let config = TransitionConfig::default();
        let solids = CollisionResolver::with_obstacles([Rect::new(0.0, 0.0, 40.0, 540.0)]);

        let mut grounded = body_at(300.0, 400.0);
        grounded.grounded = true;
        state.record_grounded(&grounded);

        let mut body = body_at(965.0, 200.0);
        let warp = state.try_warp(&mut body, BOUNDS, &solids, &config).unwrap();

        assert_eq!(warp.gravity, GravityDirection::Right);
        assert!(warp.used_fallback);
        // nothing was recorded under RIGHT since load, so the spawn seed is used
        assert_eq!(body.position, spawn);
    }

    #[test]
    fn checkpoint_moves_anchor_and_respawn_restores_it() {
        let mut state = LevelRuntimeState::new(Vec2::ZERO, GravityDirection::Down);
        let mut checkpoints = vec![Checkpoint::new(Vec2::new(500.0, 300.0)), Checkpoint::new(Vec2::new(510.0, 300.0))];
        let mut body = body_at(495.0, 290.0);

        let mut warp_body = body_at(-25.0, 200.0);
        state.try_warp(&mut warp_body, BOUNDS, &CollisionResolver::new(), &TransitionConfig::default());

        assert_eq!(state.activate_checkpoint(&mut checkpoints, &body, &CollisionResolver::new()), Some(0));
        assert_eq!(state.activate_checkpoint(&mut checkpoints, &body, &CollisionResolver::new()), Some(1));
        assert_eq!(state.activate_checkpoint(&mut checkpoints, &body, &CollisionResolver::new()), None);
        assert_eq!(state.anchor().gravity, GravityDirection::Left);
        assert_eq!(state.anchor().position, Vec2::new(500.0, 285.0));

        body.position = Vec2::new(5000.0, 5000.0);
        body.velocity = Vec2::new(10.0, 10.0);
        state.respawn(&mut body);

        assert_eq!(body.position, Vec2::new(500.0, 285.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(state.gravity(), GravityDirection::Left);
        assert_eq!(state.deaths(), 1);
        assert_eq!(state.warp_cooldown(), 0.0);
    }

    #[test]
    fn checkpoint_against_a_wall_keeps_body_position() {
        let mut state = LevelRuntimeState::new(Vec2::ZERO, GravityDirection::Down);
        let solids = CollisionResolver::with_obstacles([Rect::new(0.0, 0.0, 40.0, 540.0)]);
        let mut checkpoints = vec![Checkpoint::new(Vec2::new(45.0, 300.0))];
        let body = body_at(40.0, 290.0);

        assert_eq!(state.activate_checkpoint(&mut checkpoints, &body, &solids), Some(0));

        let anchor = state.anchor().position;
        assert_eq!(anchor, Vec2::new(40.0, 290.0));
        assert!(!solids.overlaps_any(&Rect::from_pos_size(anchor, body.size)));
    }
}
