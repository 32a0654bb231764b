//! Listening server and its online/offline lifecycle.
//!
//! The transport module binds the command socket, accepts connections in a
//! background thread, and hands each accepted connection to a detached
//! thread running the active handler variant's read loop.

mod errors;
mod server;

pub use errors::ServerError;
pub use server::CommandServer;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
