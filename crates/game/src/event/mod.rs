mod types;

pub use types::{DeathCause, LevelEvent};
