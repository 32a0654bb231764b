//! Echo variant: returns every chunk to the sender verbatim.

use std::io::Write;
use std::net::TcpStream;
use std::sync::Arc;

use tracing::warn;

use crate::context::SessionContext;

use super::{HANDLER_TARGET, RequestHandler, read_chunk};

/// Connectivity-testing handler.
///
/// Never touches the request queue; `process_data` is a no-op.
pub(crate) struct EchoHandler {
    context: Arc<SessionContext>,
}

impl EchoHandler {
    pub(crate) fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

impl RequestHandler for EchoHandler {
    fn handle_connection(&self, mut stream: TcpStream) {
        let mut chunk = vec![0_u8; self.context.config().chunk_size];
        loop {
            let read = match read_chunk(&mut stream, &mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) => {
                    warn!(target: HANDLER_TARGET, %error, "echo read failed");
                    break;
                }
            };
            if let Err(error) = stream.write_all(&chunk[..read]) {
                warn!(target: HANDLER_TARGET, %error, "echo write failed");
                break;
            }
        }
    }

    fn process_data(&self) {}
}
