use std::time::Duration;

use super::{DEFAULT_DISCOVERY_PORT, DEFAULT_SESSION_PORT};

#[derive(Debug, Clone)]
pub struct NetConfig {
    pub session_port: u16,
    pub discovery_port: u16,
    pub connect_timeout: Duration,
    pub discovery_timeout: Duration,
    /// How often the advertiser wakes up to check whether it was stopped.
    pub advertise_poll: Duration,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            session_port: DEFAULT_SESSION_PORT,
            discovery_port: DEFAULT_DISCOVERY_PORT,
            connect_timeout: Duration::from_secs(3),
            discovery_timeout: Duration::from_millis(1500),
            advertise_poll: Duration::from_millis(250),
        }
    }
}
