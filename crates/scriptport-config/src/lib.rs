//! Declarative configuration for the scriptport command socket.
//!
//! The configuration types are shared by the embedding host and the core
//! library. They describe where the server listens, which request-handling
//! variant is active, how connection reads are chunked, and how telemetry is
//! formatted. Loading and persisting these values is the host's concern; this
//! crate only models the types and their defaults.

mod defaults;
mod endpoint;
mod logging;
mod server;
mod variant;

pub use defaults::{
    DEFAULT_CHUNK_SIZE, DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, DEFAULT_SENTINEL,
    DEFAULT_TICK_INTERVAL_MS,
};
pub use endpoint::{EndpointParseError, TcpEndpoint};
pub use logging::{LogFormat, LogFormatParseError};
pub use server::{ConfigError, ServerConfig};
pub use variant::{HandlerVariant, HandlerVariantParseError};
