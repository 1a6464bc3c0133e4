use serde::{Deserialize, Serialize};

/// Units are level units (pixels) and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub max_fall_speed: f32,

    pub move_acceleration: f32,
    pub max_move_speed: f32,

    /// Lateral velocity multiplier applied on ticks without a single direction held.
    pub friction: f32,
    pub stop_epsilon: f32,

    pub jump_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            max_fall_speed: 900.0,

            move_acceleration: 2400.0,
            max_move_speed: 300.0,

            friction: 0.8,
            stop_epsilon: 5.0,

            jump_speed: 650.0,
        }
    }
}
