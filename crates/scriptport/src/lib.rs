//! Command socket for long-running scripting hosts.
//!
//! The crate bridges two execution contexts that must never touch each
//! other directly: network threads accepting arbitrarily fragmented input,
//! and a single-threaded host whose scripting and logging APIs may only be
//! called from its own scheduling tick. Connection threads turn bytes into
//! payload strings and append them to a shared [`RequestQueue`]; the host
//! drives a [`Dispatcher`] tick on a fixed period which drains the queue
//! and executes each payload through the host-provided [`ScriptBridge`].
//!
//! Four request-handling variants cover the supported framing rules: raw
//! echo, per-chunk logging, per-chunk stacking with directive routing, and
//! sentinel-terminated aggregation. The active variant is selected through
//! [`scriptport_config::HandlerVariant`] and applies to subsequently
//! accepted connections.
//!
//! All shared state lives in an explicit [`SessionContext`] handed to the
//! server, dispatcher, and handler constructors; there is no ambient
//! global, so multiple independent instances can coexist in one process.

mod bridge;
mod context;
mod dispatch;
mod handler;
mod queue;
mod router;
mod telemetry;
#[cfg(test)]
mod test_support;
mod transport;

pub use bridge::{HostLog, LogSeverity, ScriptBridge, ScriptBridgeError, ScriptValue, TracingHostLog};
pub use context::SessionContext;
pub use dispatch::{Dispatcher, SchedulerError, ThreadScheduler, TickHandle, TickScheduler};
pub use handler::RequestHandler;
pub use queue::RequestQueue;
pub use router::{ScriptDirective, ScriptLanguage, classify};
pub use telemetry::{TelemetryError, TelemetryHandle, initialise};
pub use transport::{CommandServer, ServerError};
