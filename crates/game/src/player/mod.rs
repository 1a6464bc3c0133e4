mod config;
mod controller;
mod state;

pub use config::PhysicsConfig;
pub use controller::{BodyController, MoveIntent};
pub use state::Body;
