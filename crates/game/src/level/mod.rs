mod data;
mod sample;
mod state;
mod transition;

pub use data::{DoorDef, LevelData, MovingPlatformDef};
pub use sample::{sample_levels, walled_floor};
pub use state::{LevelRuntimeState, RespawnAnchor};
pub use transition::{Edge, TransitionConfig, Warp, beyond_kill_plane, exited_edge};
