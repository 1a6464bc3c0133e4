mod input;
mod session;
mod tick;

pub use input::{Buttons, InputState};
pub use session::{GameSession, SessionConfig};
pub use tick::FixedTimestep;
