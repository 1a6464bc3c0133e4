use std::time::Duration;

use clap::ValueEnum;
use gravflux::SessionConfig;

/// Direction held for the whole run; the driver has no interactive input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Hold {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub tick_rate: u32,
    /// Wall-clock limit; `None` runs until every level is completed.
    pub run_for: Option<Duration>,
    pub hold: Hold,
    pub session: SessionConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            run_for: None,
            hold: Hold::None,
            session: SessionConfig::default(),
        }
    }
}
