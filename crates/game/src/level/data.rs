use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entities::{Checkpoint, CoopButton, CoopDoor, ExitGate, FluxOrb, Spike};
use crate::geometry::Rect;
use crate::gravity::GravityDirection;
use crate::physics::MovingObstacle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformDef {
    pub rect: Rect,
    pub end: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDef {
    pub rect: Rect,
    pub links: Vec<i32>,
}

/// Read-only level description as authored by the level tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelData {
    pub name: String,
    /// Logical bounds: the playfield is `[0, size.x] x [0, size.y]`.
    pub size: Vec2,
    pub platforms: Vec<Rect>,
    pub moving_platforms: Vec<MovingPlatformDef>,
    pub spikes: Vec<Rect>,
    pub orbs: Vec<Vec2>,
    pub checkpoints: Vec<Vec2>,
    pub buttons: Vec<Rect>,
    pub doors: Vec<DoorDef>,
    pub exit: Rect,
    pub spawn: Vec2,
    pub spawn_gravity: GravityDirection,
    pub par_time: f32,
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            name: String::from("untitled"),
            size: Vec2::new(960.0, 540.0),
            platforms: Vec::new(),
            moving_platforms: Vec::new(),
            spikes: Vec::new(),
            orbs: Vec::new(),
            checkpoints: Vec::new(),
            buttons: Vec::new(),
            doors: Vec::new(),
            exit: Rect::new(900.0, 0.0, 40.0, 60.0),
            spawn: Vec2::new(40.0, 40.0),
            spawn_gravity: GravityDirection::Down,
            par_time: 30.0,
        }
    }
}

impl LevelData {
    pub fn moving_obstacles(&self) -> Vec<MovingObstacle> {
        self.moving_platforms
            .iter()
            .map(|def| MovingObstacle::new(def.rect, def.end, def.speed))
            .collect()
    }

    pub fn spike_entities(&self) -> Vec<Spike> {
        self.spikes.iter().copied().map(Spike::new).collect()
    }

    pub fn orb_entities(&self) -> Vec<FluxOrb> {
        self.orbs.iter().copied().map(FluxOrb::new).collect()
    }

    pub fn checkpoint_entities(&self) -> Vec<Checkpoint> {
        self.checkpoints.iter().copied().map(Checkpoint::new).collect()
    }

    pub fn button_entities(&self) -> Vec<CoopButton> {
        self.buttons.iter().copied().map(CoopButton::new).collect()
    }

    pub fn door_entities(&self) -> Vec<CoopDoor> {
        self.doors
            .iter()
            .map(|def| CoopDoor::new(def.rect, def.links.clone()))
            .collect()
    }

    pub fn exit_gate(&self) -> ExitGate {
        ExitGate::new(self.exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_json() {
        let json = r#"{
            "name": "tiny",
            "size": [320.0, 240.0],
            "platforms": [{ "pos": [0.0, 200.0], "size": [320.0, 40.0] }],
            "orbs": [[100.0, 150.0]],
            "doors": [{ "rect": { "pos": [200.0, 100.0], "size": [10.0, 100.0] }, "links": [0, 7] }],
            "spawn_gravity": "LEFT",
            "par_time": 12.5
        }"#;

        let level: LevelData = serde_json::from_str(json).unwrap();

        assert_eq!(level.name, "tiny");
        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.orb_entities()[0].position, Vec2::new(100.0, 150.0));
        assert_eq!(level.door_entities()[0].linked_buttons, vec![0, 7]);
        assert_eq!(level.spawn_gravity, GravityDirection::Left);
        assert!(level.spikes.is_empty());
        assert_eq!(level.spawn, LevelData::default().spawn);
    }
}
