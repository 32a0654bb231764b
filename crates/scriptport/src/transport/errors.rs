//! Error types for server lifecycle and socket operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while starting, running, or stopping the server.
///
/// Lifecycle misuse (`AlreadyOnline`, `NotOnline`) is always surfaced to
/// the caller. A bind conflict on an in-use address is deliberately *not*
/// represented here: it is recoverable, so [`CommandServer::start`] logs a
/// warning and leaves the server offline instead of failing.
///
/// [`CommandServer::start`]: super::CommandServer::start
#[derive(Debug, Error)]
pub enum ServerError {
    /// `start()` was called while the server is online.
    #[error("server is already online")]
    AlreadyOnline,
    /// `stop()` was called while the server is offline.
    #[error("server is not online")]
    NotOnline,
    /// The configured host name did not resolve.
    #[error("failed to resolve address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// Resolution yielded no usable addresses.
    #[error("no addresses resolved for {host}:{port}")]
    ResolveEmpty { host: String, port: u16 },
    /// Binding the listening socket failed for a non-recoverable reason.
    #[error("failed to bind listener at {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// The listener could not be switched to non-blocking accepts.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        #[source]
        source: io::Error,
    },
    /// The accept-loop thread panicked before it could be joined.
    #[error("accept thread panicked")]
    AcceptThreadPanic,
}
