mod config;
mod driver;

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gravflux::net::{DEFAULT_DISCOVERY_PORT, DEFAULT_SESSION_PORT};
use gravflux::{LanAdvertiser, LevelData, NetConfig, PeerListener, PeerSession, discover_host, sample_levels};

use config::{DriverConfig, Hold};
use driver::Driver;

#[derive(Parser)]
#[command(name = "gravflux")]
#[command(about = "Headless gravity platformer with LAN co-op")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    #[arg(short, long, help = "Level file (JSON); defaults to the built-in levels")]
    level: Option<PathBuf>,

    #[arg(short, long, help = "Stop after this many seconds")]
    seconds: Option<f32>,

    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(long, value_enum, default_value_t = Hold::None, help = "Direction held for the whole run")]
    hold: Hold,
}

#[derive(Subcommand)]
enum Mode {
    /// Play without a peer
    Solo,
    /// Wait for one peer and answer discovery requests meanwhile
    Host {
        #[arg(short, long, default_value_t = DEFAULT_SESSION_PORT)]
        port: u16,

        #[arg(long, default_value_t = DEFAULT_DISCOVERY_PORT)]
        discovery_port: u16,
    },
    /// Connect to a host, discovering one on the LAN when no address is given
    Join {
        #[arg(short, long)]
        addr: Option<SocketAddr>,

        #[arg(long, default_value_t = DEFAULT_DISCOVERY_PORT)]
        discovery_port: u16,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let levels = match &args.level {
        Some(path) => vec![load_level(path)?],
        None => sample_levels(),
    };

    let mut net = NetConfig::default();
    let peer = match args.mode {
        Mode::Solo => None,
        Mode::Host { port, discovery_port } => {
            net.session_port = port;
            net.discovery_port = discovery_port;
            host_peer(&net)?
        }
        Mode::Join { addr, discovery_port } => {
            net.discovery_port = discovery_port;
            join_peer(addr, &net)
        }
    };

    if peer.is_none() {
        log::info!("playing single-player");
    }

    let config = DriverConfig {
        tick_rate: args.tick_rate,
        run_for: args.seconds.map(Duration::from_secs_f32),
        hold: args.hold,
        ..Default::default()
    };

    let mut driver = Driver::new(levels, config, peer);
    driver.run();

    for (level, record) in driver.levels().iter().zip(driver.records()) {
        match record {
            Some(record) => log::info!(
                "{}: {:.2}s, {}, {} death(s)",
                level.name,
                record.best_time,
                record.medal.map_or("no medal", |m| m.name()),
                record.deaths
            ),
            None => log::info!("{}: not completed", level.name),
        }
    }

    Ok(())
}

fn load_level(path: &Path) -> Result<LevelData> {
    let text = fs::read_to_string(path).with_context(|| format!("reading level file {}", path.display()))?;
    let level = serde_json::from_str(&text).with_context(|| format!("parsing level file {}", path.display()))?;
    Ok(level)
}

/// Binding the session port is fatal; the advertiser is best-effort.
fn host_peer(net: &NetConfig) -> Result<Option<PeerSession>> {
    let listener = PeerListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), net.session_port))
        .context("binding session port")?;

    let mut advertiser = match LanAdvertiser::spawn(net.discovery_port, net.advertise_poll) {
        Ok(advertiser) => Some(advertiser),
        Err(e) => {
            log::warn!("discovery unavailable: {}", e);
            None
        }
    };

    let peer = match listener.accept() {
        Ok(peer) => Some(peer),
        Err(e) => {
            log::warn!("no peer joined: {}", e);
            None
        }
    };

    if let Some(advertiser) = advertiser.as_mut() {
        advertiser.stop();
    }

    Ok(peer)
}

fn join_peer(addr: Option<SocketAddr>, net: &NetConfig) -> Option<PeerSession> {
    let addr = match addr {
        Some(addr) => addr,
        None => {
            let Some(ip) = discover_host(net.discovery_port, net.discovery_timeout) else {
                log::warn!("no host answered on port {}", net.discovery_port);
                return None;
            };
            SocketAddr::new(ip, net.session_port)
        }
    };

    match PeerSession::connect(addr, net.connect_timeout) {
        Ok(peer) => Some(peer),
        Err(e) => {
            log::warn!("could not join {}: {}", addr, e);
            None
        }
    }
}
