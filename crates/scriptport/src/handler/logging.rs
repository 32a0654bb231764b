//! Logging variant: queues raw chunks, logs them on the tick.

use std::net::TcpStream;
use std::sync::Arc;

use crate::bridge::LogSeverity;
use crate::context::SessionContext;

use super::{RequestHandler, stack_chunks};

/// Handler that mirrors incoming chunks into the host's log.
///
/// Each chunk read becomes one queue entry; the tick drains the queue and
/// forwards every entry to the host logging bridge unchanged.
pub(crate) struct LoggingHandler {
    context: Arc<SessionContext>,
}

impl LoggingHandler {
    pub(crate) fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

impl RequestHandler for LoggingHandler {
    fn handle_connection(&self, stream: TcpStream) {
        stack_chunks(&self.context, stream);
    }

    fn process_data(&self) {
        for entry in self.context.queue().drain_all() {
            self.context.host_log().log(&entry, LogSeverity::Info);
        }
    }
}
