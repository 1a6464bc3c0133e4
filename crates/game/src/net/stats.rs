use std::sync::atomic::{AtomicU64, Ordering};

/// Line counters shared between a session and its receive loop.
#[derive(Debug, Default)]
pub struct SessionStats {
    lines_sent: AtomicU64,
    lines_received: AtomicU64,
    lines_dropped: AtomicU64,
}

impl SessionStats {
    pub fn lines_sent(&self) -> u64 {
        self.lines_sent.load(Ordering::Relaxed)
    }

    pub fn lines_received(&self) -> u64 {
        self.lines_received.load(Ordering::Relaxed)
    }

    pub fn lines_dropped(&self) -> u64 {
        self.lines_dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn record_sent(&self) {
        self.lines_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self) {
        self.lines_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.lines_dropped.fetch_add(1, Ordering::Relaxed);
    }
}
