use std::io;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl NetError {
    pub(crate) fn from_connect(err: io::Error, timeout: Duration) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => NetError::Timeout(timeout),
            _ => NetError::Io(err),
        }
    }
}
