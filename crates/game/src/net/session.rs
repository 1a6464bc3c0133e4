use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::gravity::GravityDirection;

use super::error::NetError;
use super::protocol::{PeerMessage, RemoteState};
use super::slot::LatestSlot;
use super::stats::SessionStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Client,
}

/// Host side before a peer arrives. Accepting consumes the listener, so
/// the host stops listening after its single peer.
pub struct PeerListener {
    listener: TcpListener,
}

impl PeerListener {
    pub fn bind<A: ToSocketAddrs>(addr: A) -> Result<Self, NetError> {
        let listener = TcpListener::bind(addr)?;
        log::info!("listening for a peer on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn accept(self) -> Result<PeerSession, NetError> {
        let (stream, addr) = self.listener.accept().map_err(|e| {
            log::warn!("accept failed: {}", e);
            NetError::Io(e)
        })?;
        log::info!("peer connected from {}", addr);
        PeerSession::start(stream, Role::Host)
    }
}

/// A connected peer. Outgoing lines are fire-and-forget; incoming lines are
/// parsed on a background thread into a latest-wins slot.
pub struct PeerSession {
    role: Role,
    peer_addr: SocketAddr,
    writer: Mutex<TcpStream>,
    inbox: Arc<LatestSlot<RemoteState>>,
    alive: Arc<AtomicBool>,
    stats: Arc<SessionStats>,
    reader: Option<JoinHandle<()>>,
}

impl PeerSession {
    pub fn host<A: ToSocketAddrs>(addr: A) -> Result<Self, NetError> {
        PeerListener::bind(addr)?.accept()
    }

    pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self, NetError> {
        log::info!("connecting to {}", addr);
        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
            log::warn!("connect to {} failed: {}", addr, e);
            NetError::from_connect(e, timeout)
        })?;
        Self::start(stream, Role::Client)
    }

    fn start(stream: TcpStream, role: Role) -> Result<Self, NetError> {
        stream.set_nodelay(true)?;
        let peer_addr = stream.peer_addr()?;
        let read_half = stream.try_clone()?;

        let inbox = Arc::new(LatestSlot::new());
        let alive = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(SessionStats::default());

        let reader = {
            let inbox = Arc::clone(&inbox);
            let alive = Arc::clone(&alive);
            let stats = Arc::clone(&stats);
            thread::Builder::new()
                .name(String::from("peer-recv"))
                .spawn(move || receive_loop(read_half, &inbox, &alive, &stats))?
        };

        Ok(Self {
            role,
            peer_addr,
            writer: Mutex::new(stream),
            inbox,
            alive,
            stats,
            reader: Some(reader),
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// False once either direction has failed or the session was closed.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Writes one line and flushes. Failures are logged and end the
    /// session; they are never reported to the caller.
    pub fn send(&self, message: &PeerMessage) {
        if !self.is_alive() {
            return;
        }

        let line = format!("{}\n", message);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
            Ok(()) => self.stats.record_sent(),
            Err(e) => {
                log::debug!("send to {} failed: {}", self.peer_addr, e);
                self.alive.store(false, Ordering::SeqCst);
            }
        }
    }

    pub fn send_state(&self, x: f32, y: f32, gravity: GravityDirection, orb_mask: u64) {
        self.send(&PeerMessage::State {
            x,
            y,
            gravity,
            orb_mask,
        });
    }

    pub fn send_level(&self, index: i32) {
        self.send(&PeerMessage::Level { index });
    }

    /// Takes the newest peer sample, leaving the slot empty. Returns an empty
    /// state when nothing arrived since the last poll.
    pub fn poll(&self) -> RemoteState {
        self.inbox.take().unwrap_or_default()
    }

    /// Shuts the socket down, which ends the blocking read, then joins the
    /// receive thread.
    pub fn close(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        {
            let writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writer.shutdown(Shutdown::Both);
        }
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                log::warn!("peer receive thread panicked");
            }
            log::info!("session with {} closed", self.peer_addr);
        }
    }
}

impl Drop for PeerSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn receive_loop(stream: TcpStream, inbox: &LatestSlot<RemoteState>, alive: &AtomicBool, stats: &SessionStats) {
    let reader = BufReader::new(stream);

    for line in reader.split(b'\n') {
        let bytes = match line {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("peer read failed: {}", e);
                break;
            }
        };

        let parsed = std::str::from_utf8(&bytes)
            .ok()
            .map(|text| text.parse::<PeerMessage>());

        match parsed {
            Some(Ok(message)) => {
                inbox.publish(RemoteState::from(message));
                stats.record_received();
            }
            Some(Err(e)) => {
                stats.record_dropped();
                log::debug!("dropped peer line: {}", e);
            }
            None => {
                stats.record_dropped();
                log::debug!("dropped non-utf8 peer line");
            }
        }
    }

    alive.store(false, Ordering::SeqCst);
    log::debug!("peer receive loop finished");
}
