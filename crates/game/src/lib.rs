pub mod entities;
pub mod event;
pub mod geometry;
pub mod gravity;
pub mod level;
pub mod net;
pub mod objective;
pub mod physics;
pub mod player;
pub mod simulation;

pub use entities::{Checkpoint, CoopButton, CoopDoor, ExitGate, FluxOrb, Spike};
pub use event::{DeathCause, LevelEvent};
pub use geometry::Rect;
pub use gravity::{Axis, GravityDirection};
pub use level::{Edge, LevelData, LevelRuntimeState, TransitionConfig, sample_levels};
pub use net::{
    LanAdvertiser, LatestSlot, NetConfig, NetError, PeerListener, PeerMessage, PeerSession,
    RemoteState, discover_host,
};
pub use objective::{LevelRecord, Medal, ObjectiveTracker};
pub use physics::{CollisionResolver, MovingObstacle};
pub use player::{Body, BodyController, MoveIntent, PhysicsConfig};
pub use simulation::{FixedTimestep, GameSession, InputState, SessionConfig};
