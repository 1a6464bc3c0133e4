mod config;
mod discovery;
mod error;
mod protocol;
mod session;
mod slot;
mod stats;

pub use config::NetConfig;
pub use discovery::{DISCOVERY_REPLY, DISCOVERY_REQUEST, LanAdvertiser, discover_host, discover_host_at};
pub use error::NetError;
pub use protocol::{MessageError, PeerMessage, RemoteState};
pub use session::{PeerListener, PeerSession, Role};
pub use slot::LatestSlot;
pub use stats::SessionStats;

pub const DEFAULT_SESSION_PORT: u16 = 47_778;
pub const DEFAULT_DISCOVERY_PORT: u16 = 47_777;
