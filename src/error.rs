//! Server error types

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised by the listener and by connection sessions
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listening socket could not be acquired; fatal at startup
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    /// Reading from or writing to a client failed; ends that session only
    #[error("Transport error with {peer}: {source}")]
    Transport { peer: SocketAddr, source: io::Error },
}

impl ServerError {
    pub(crate) fn transport(peer: SocketAddr) -> impl FnOnce(io::Error) -> Self {
        move |source| ServerError::Transport { peer, source }
    }
}
