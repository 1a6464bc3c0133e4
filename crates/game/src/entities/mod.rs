mod coop;
mod triggers;

pub use coop::{CoopButton, CoopDoor, update_coop};
pub use triggers::{Checkpoint, ExitGate, FluxOrb, Spike};
