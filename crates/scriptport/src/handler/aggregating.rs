//! Aggregating variant: collects chunks until a sentinel token appears.

use std::net::TcpStream;
use std::sync::Arc;

use tracing::warn;

use crate::bridge::LogSeverity;
use crate::context::SessionContext;
use crate::router::ScriptLanguage;

use super::{HANDLER_TARGET, RequestHandler, read_chunk};

/// Handler that frames one logical request per connection.
///
/// Chunks accumulate as raw bytes in arrival order until the sentinel
/// token appears. The sentinel may straddle a chunk boundary, so detection
/// scans the concatenation of the last two accumulated chunks rather than
/// the newest chunk alone. On detection the sentinel and everything after
/// it are discarded, the accumulated bytes collapse and decode into a
/// single payload, and the connection completes. Decoding happens only at
/// that point: a multi-byte character split across two reads stays intact.
/// A peer that closes before sending the sentinel discards the partial
/// request.
///
/// Known limitation: a sentinel split across more than two chunks escapes
/// the two-chunk lookback and is treated as payload bytes.
///
/// On the tick, every queued payload is executed unconditionally as Python
/// code; no routing is applied.
pub(crate) struct AggregatingHandler {
    context: Arc<SessionContext>,
}

impl AggregatingHandler {
    pub(crate) fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

impl RequestHandler for AggregatingHandler {
    fn handle_connection(&self, mut stream: TcpStream) {
        let mut aggregator = Aggregator::new(self.context.config().sentinel.as_bytes());
        let mut chunk = vec![0_u8; self.context.config().chunk_size];
        loop {
            let read = match read_chunk(&mut stream, &mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) => {
                    warn!(target: HANDLER_TARGET, %error, "aggregating read failed");
                    break;
                }
            };
            if let Some(payload) = aggregator.push(&chunk[..read]) {
                self.context.queue().append(payload);
                break;
            }
        }
    }

    fn process_data(&self) {
        for payload in self.context.queue().drain_all() {
            match self
                .context
                .bridge()
                .execute_script_code(&payload, ScriptLanguage::Python)
            {
                Ok(value) => {
                    let rendered = value.as_deref().unwrap_or("<no value>");
                    self.context.host_log().log(
                        &format!("request return value: '{rendered}' (Python)"),
                        LogSeverity::Verbose,
                    );
                }
                Err(error) => self
                    .context
                    .host_log()
                    .log(&error.to_string(), LogSeverity::Error),
            }
        }
    }
}

/// Accumulates raw byte chunks and detects the sentinel across the last two.
struct Aggregator {
    sentinel: Vec<u8>,
    chunks: Vec<Vec<u8>>,
}

impl Aggregator {
    fn new(sentinel: &[u8]) -> Self {
        Self {
            sentinel: sentinel.to_vec(),
            chunks: Vec::new(),
        }
    }

    /// Appends a chunk; returns the completed payload once the sentinel is
    /// found, with the sentinel and any trailing bytes stripped. The bytes
    /// are decoded as one unit, after trimming.
    fn push(&mut self, chunk: &[u8]) -> Option<String> {
        self.chunks.push(chunk.to_vec());
        let window_start = self.chunks.len().saturating_sub(2);
        let window = self.chunks[window_start..].concat();
        let sentinel_at = find_subslice(&window, &self.sentinel)?;

        let mut payload = self.chunks[..window_start].concat();
        payload.extend_from_slice(&window[..sentinel_at]);
        Some(String::from_utf8_lossy(&payload).into_owned())
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|candidate| candidate == needle)
}
