use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::error::NetError;

pub const DISCOVERY_REQUEST: &str = "GRAVFLUX_DISCOVER";
pub const DISCOVERY_REPLY: &str = "GRAVFLUX_HOST";

const DATAGRAM_SIZE: usize = 64;

/// Answers discovery broadcasts on a background thread until stopped.
///
/// The socket uses a read timeout so `stop` is noticed within one poll
/// interval; closing the process also ends it.
pub struct LanAdvertiser {
    local_addr: SocketAddr,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LanAdvertiser {
    pub fn spawn(port: u16, poll: Duration) -> Result<Self, NetError> {
        Self::spawn_on(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port), poll)
    }

    pub fn spawn_on(addr: SocketAddr, poll: Duration) -> Result<Self, NetError> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(poll))?;
        let local_addr = socket.local_addr()?;

        let running = Arc::new(AtomicBool::new(true));
        let handle = {
            let running = Arc::clone(&running);
            thread::Builder::new()
                .name(String::from("lan-advertise"))
                .spawn(move || advertise_loop(&socket, &running))?
        };

        log::info!("advertising on {}", local_addr);
        Ok(Self {
            local_addr,
            running,
            handle: Some(handle),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::info!("stopped advertising on {}", self.local_addr);
        }
    }
}

impl Drop for LanAdvertiser {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advertise_loop(socket: &UdpSocket, running: &AtomicBool) {
    let mut buf = [0u8; DATAGRAM_SIZE];

    while running.load(Ordering::SeqCst) {
        match socket.recv_from(&mut buf) {
            Ok((size, from)) => {
                if !is_token(&buf[..size], DISCOVERY_REQUEST) {
                    continue;
                }
                log::debug!("discovery request from {}", from);
                if let Err(e) = socket.send_to(DISCOVERY_REPLY.as_bytes(), from) {
                    log::debug!("discovery reply to {} failed: {}", from, e);
                }
            }
            Err(ref e) if is_timeout(e) => continue,
            Err(e) => {
                log::debug!("advertiser socket failed: {}", e);
                break;
            }
        }
    }

    running.store(false, Ordering::SeqCst);
}

/// Broadcasts one discovery request on the LAN and returns the address of
/// the first host that answers within `timeout`.
pub fn discover_host(port: u16, timeout: Duration) -> Option<IpAddr> {
    discover_host_at(SocketAddr::new(IpAddr::V4(Ipv4Addr::BROADCAST), port), timeout)
}

pub fn discover_host_at(target: SocketAddr, timeout: Duration) -> Option<IpAddr> {
    match probe(target, timeout) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("discovery via {} failed: {}", target, e);
            None
        }
    }
}

fn probe(target: SocketAddr, timeout: Duration) -> io::Result<Option<IpAddr>> {
    let socket = UdpSocket::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0))?;
    socket.set_broadcast(true)?;
    socket.send_to(DISCOVERY_REQUEST.as_bytes(), target)?;

    let deadline = Instant::now() + timeout;
    let mut buf = [0u8; DATAGRAM_SIZE];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            log::debug!("no discovery reply within {:?}", timeout);
            return Ok(None);
        }
        socket.set_read_timeout(Some(remaining))?;

        match socket.recv_from(&mut buf) {
            Ok((size, from)) if is_token(&buf[..size], DISCOVERY_REPLY) => {
                log::info!("found host at {}", from.ip());
                return Ok(Some(from.ip()));
            }
            Ok(_) => continue,
            Err(ref e) if is_timeout(e) => continue,
            Err(e) => return Err(e),
        }
    }
}

fn is_token(datagram: &[u8], token: &str) -> bool {
    std::str::from_utf8(datagram).is_ok_and(|text| text.trim() == token)
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}
