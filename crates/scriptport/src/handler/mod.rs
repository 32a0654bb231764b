//! Request-handling strategies applied to accepted connections.
//!
//! Every variant reads its connection in fixed-size chunks on a dedicated
//! network thread until the peer closes or a variant-specific termination
//! condition fires. Variants either act on the bytes immediately (echo) or
//! append completed payloads to the shared [`RequestQueue`] for the host
//! tick to consume. The `process_data` half of each variant runs only on
//! the dispatcher tick and is the sole place host bridges are invoked.
//!
//! [`RequestQueue`]: crate::queue::RequestQueue

mod aggregating;
mod echo;
mod logging;
mod stack;

use std::io::{self, Read};
use std::net::TcpStream;
use std::sync::Arc;

use scriptport_config::HandlerVariant;
use tracing::warn;

use crate::context::SessionContext;

pub(crate) use aggregating::AggregatingHandler;
pub(crate) use echo::EchoHandler;
pub(crate) use logging::LoggingHandler;
pub(crate) use stack::StackHandler;

const HANDLER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::handler");

/// Uniform interface over the four request-handling variants.
pub trait RequestHandler: Send + Sync {
    /// Runs the variant's read loop for one accepted connection.
    ///
    /// Executes on a dedicated network thread; implementations must not
    /// call host bridges from here.
    fn handle_connection(&self, stream: TcpStream);

    /// Drains and acts on queued payloads.
    ///
    /// Executes on the host's dispatcher tick only.
    fn process_data(&self);
}

/// Builds the handler implementation for a variant.
pub(crate) fn build(variant: HandlerVariant, context: Arc<SessionContext>) -> Arc<dyn RequestHandler> {
    match variant {
        HandlerVariant::Echo => Arc::new(EchoHandler::new(context)),
        HandlerVariant::Logging => Arc::new(LoggingHandler::new(context)),
        HandlerVariant::DefaultStack => Arc::new(StackHandler::new(context)),
        HandlerVariant::PythonStack => Arc::new(AggregatingHandler::new(context)),
    }
}

/// Reads one chunk from the stream, retrying on interrupts.
fn read_chunk(stream: &mut TcpStream, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

/// Shared read loop for the per-chunk stacking variants.
///
/// Pushes one queue entry per chunk read, in arrival order, until the peer
/// closes the connection.
fn stack_chunks(context: &SessionContext, mut stream: TcpStream) {
    let mut chunk = vec![0_u8; context.config().chunk_size];
    loop {
        let read = match read_chunk(&mut stream, &mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) => {
                warn!(target: HANDLER_TARGET, %error, "connection read failed");
                break;
            }
        };
        let payload = String::from_utf8_lossy(&chunk[..read]).into_owned();
        context.queue().append(payload);
    }
}
