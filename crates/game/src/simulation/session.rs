use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entities::{Checkpoint, CoopButton, CoopDoor, Spike, update_coop};
use crate::event::{DeathCause, LevelEvent};
use crate::geometry::Rect;
use crate::gravity::GravityDirection;
use crate::level::{LevelData, LevelRuntimeState, TransitionConfig, beyond_kill_plane};
use crate::net::RemoteState;
use crate::objective::{Medal, ObjectiveTracker, ObjectiveUpdate};
use crate::physics::{CollisionResolver, MovingObstacle};
use crate::player::{Body, BodyController, PhysicsConfig};

use super::InputState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub physics: PhysicsConfig,
    pub transitions: TransitionConfig,
    /// Upper bound on a single tick's dt.
    pub max_dt: f32,
    pub body_size: Vec2,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            transitions: TransitionConfig::default(),
            max_dt: 0.05,
            body_size: Vec2::new(24.0, 32.0),
        }
    }
}

/// One loaded level being played: owns the body, the entities and the
/// transition state, and advances them in a fixed order every tick.
pub struct GameSession {
    level: LevelData,
    config: SessionConfig,
    controller: BodyController,
    input: InputState,
    body: Body,
    runtime: LevelRuntimeState,
    moving: Vec<MovingObstacle>,
    spikes: Vec<Spike>,
    checkpoints: Vec<Checkpoint>,
    buttons: Vec<CoopButton>,
    doors: Vec<CoopDoor>,
    objective: ObjectiveTracker,
    solids: CollisionResolver,
    resolver: CollisionResolver,
    peer_body: Option<Rect>,
    completion: Option<(f32, Option<Medal>)>,
}

impl GameSession {
    pub fn new(level: LevelData) -> Self {
        Self::with_config(level, SessionConfig::default())
    }

    pub fn with_config(level: LevelData, config: SessionConfig) -> Self {
        let controller = BodyController::new(config.physics.clone());
        let objective = ObjectiveTracker::new(level.orb_entities(), level.exit_gate(), level.par_time);

        let mut session = Self {
            body: Body::new(level.spawn, config.body_size),
            runtime: LevelRuntimeState::new(level.spawn, level.spawn_gravity),
            moving: level.moving_obstacles(),
            spikes: level.spike_entities(),
            checkpoints: level.checkpoint_entities(),
            buttons: level.button_entities(),
            doors: level.door_entities(),
            solids: CollisionResolver::with_obstacles(level.platforms.iter().copied()),
            resolver: CollisionResolver::new(),
            input: InputState::new(),
            peer_body: None,
            completion: None,
            objective,
            controller,
            config,
            level,
        };
        session.update_coop();
        session
    }

    /// Discards all runtime state and starts the level over.
    pub fn reload(&mut self) {
        let level = std::mem::take(&mut self.level);
        let config = self.config.clone();
        *self = Self::with_config(level, config);
        log::debug!("level {} reloaded", self.level.name);
    }

    pub fn set_left_held(&mut self, held: bool) {
        self.input.set_left_held(held);
    }

    pub fn set_right_held(&mut self, held: bool) {
        self.input.set_right_held(held);
    }

    pub fn set_jump_held(&mut self, held: bool) {
        self.input.set_jump_held(held);
    }

    pub fn tick(&mut self, dt: f32) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        if self.completion.is_some() {
            return events;
        }

        let dt = dt.clamp(0.0, self.config.max_dt);

        for platform in &mut self.moving {
            platform.update(dt);
        }
        self.update_coop();
        self.rebuild_obstacles();

        let gravity = self.runtime.gravity();
        let intent = self.input.take_intent();
        self.controller.step(&mut self.body, gravity, intent, &self.resolver, dt);

        self.runtime.record_grounded(&self.body);

        self.runtime.tick_cooldown(dt);
        if let Some(warp) =
            self.runtime
                .try_warp(&mut self.body, self.level.size, &self.solids, &self.config.transitions)
        {
            events.push(LevelEvent::Warped {
                edge: warp.edge,
                gravity: warp.gravity,
                used_fallback: warp.used_fallback,
            });
        }

        if beyond_kill_plane(self.body.position, self.level.size, self.config.transitions.kill_margin) {
            events.push(self.respawn(DeathCause::KillPlane));
        }

        if let Some(index) =
            self.runtime
                .activate_checkpoint(&mut self.checkpoints, &self.body, &self.solids)
        {
            events.push(LevelEvent::CheckpointActivated { index });
        }

        let body_rect = self.body.rect();
        if self.spikes.iter().any(|s| s.hits(&body_rect)) {
            events.push(self.respawn(DeathCause::Hazard));
        }

        let update = self.objective.update(dt, &self.body.rect());
        push_objective_events(&mut events, update, false);

        if let Some((elapsed, medal)) = self.objective.check_exit(&self.body.rect()) {
            log::info!("level {} completed in {:.2}s", self.level.name, elapsed);
            self.completion = Some((elapsed, medal));
            events.push(LevelEvent::Completed { elapsed, medal });
        }

        events
    }

    /// Mirrors the latest peer sample: its body presses buttons and its
    /// collected orbs count as ours.
    pub fn apply_remote(&mut self, remote: &RemoteState) -> Vec<LevelEvent> {
        let mut events = Vec::new();

        if let Some(position) = remote.position() {
            self.peer_body = Some(Rect::from_pos_size(position, self.config.body_size));
        }

        if let Some(mask) = remote.orb_mask {
            if self.completion.is_none() {
                let update = self.objective.apply_remote_mask(mask);
                push_objective_events(&mut events, update, true);
            }
        }

        events
    }

    pub fn clear_peer(&mut self) {
        self.peer_body = None;
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    pub fn gravity(&self) -> GravityDirection {
        self.runtime.gravity()
    }

    pub fn runtime(&self) -> &LevelRuntimeState {
        &self.runtime
    }

    pub fn deaths(&self) -> u32 {
        self.runtime.deaths()
    }

    pub fn elapsed(&self) -> f32 {
        self.objective.elapsed()
    }

    pub fn par_time(&self) -> f32 {
        self.objective.par_time()
    }

    pub fn objective(&self) -> &ObjectiveTracker {
        &self.objective
    }

    pub fn orb_mask(&self) -> u64 {
        self.objective.orb_mask()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn buttons(&self) -> &[CoopButton] {
        &self.buttons
    }

    pub fn doors(&self) -> &[CoopDoor] {
        &self.doors
    }

    pub fn moving_platforms(&self) -> &[MovingObstacle] {
        &self.moving
    }

    pub fn peer_body(&self) -> Option<Rect> {
        self.peer_body
    }

    pub fn completion(&self) -> Option<(f32, Option<Medal>)> {
        self.completion
    }

    fn update_coop(&mut self) {
        let mut bodies = vec![self.body.rect()];
        bodies.extend(self.peer_body);
        update_coop(&mut self.buttons, &mut self.doors, &bodies);
    }

    fn rebuild_obstacles(&mut self) {
        self.resolver.clear();
        self.resolver.extend(self.solids.obstacles().iter().copied());
        self.resolver.extend(self.moving.iter().map(|m| m.rect));
        self.resolver.extend(self.doors.iter().filter_map(CoopDoor::solid_rect));
    }

    fn respawn(&mut self, cause: DeathCause) -> LevelEvent {
        self.runtime.respawn(&mut self.body);
        log::debug!("{}", cause.as_str());
        LevelEvent::Respawned {
            cause,
            deaths: self.runtime.deaths(),
        }
    }
}

fn push_objective_events(events: &mut Vec<LevelEvent>, update: ObjectiveUpdate, by_peer: bool) {
    events.extend(
        update
            .collected
            .into_iter()
            .map(|index| LevelEvent::OrbCollected { index, by_peer }),
    );
    if update.unlocked {
        events.push(LevelEvent::ExitUnlocked);
    }
}
