//! Default values shared by the configuration types.

/// Default address the command socket binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default command-port number.
pub const DEFAULT_PORT: u16 = 12288;

/// Default size of a single connection read, in bytes.
///
/// Historical deployments used 1024 or 4096 depending on the handler
/// variant; the chunk size is now a single tunable shared by all variants.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default sentinel token terminating an aggregated request.
pub const DEFAULT_SENTINEL: &str = "<!RE>";

/// Default dispatcher tick interval, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

pub(crate) fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
