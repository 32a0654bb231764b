//! Top-level server configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{
    default_chunk_size, default_log_filter, default_sentinel, default_tick_interval_ms,
};
use crate::endpoint::TcpEndpoint;
use crate::logging::LogFormat;
use crate::variant::HandlerVariant;

/// Configuration for the command socket and its dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Endpoint the listening socket binds to.
    pub endpoint: TcpEndpoint,
    /// Handler variant applied to accepted connections.
    pub handler: HandlerVariant,
    /// Size of a single connection read, in bytes.
    pub chunk_size: usize,
    /// Token terminating an aggregated request in the aggregating variant.
    pub sentinel: String,
    /// Dispatcher tick interval, in milliseconds.
    pub tick_interval_ms: u64,
    /// Log filter expression for the telemetry subscriber.
    pub log_filter: String,
    /// Telemetry output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: TcpEndpoint::default(),
            handler: HandlerVariant::default(),
            chunk_size: default_chunk_size(),
            sentinel: default_sentinel(),
            tick_interval_ms: default_tick_interval_ms(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Dispatcher tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks the configuration for values the server cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.sentinel.is_empty() {
            return Err(ConfigError::EmptySentinel);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

/// Errors raised when validating a [`ServerConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Connection reads need a non-zero buffer.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    /// The aggregating variant cannot terminate without a sentinel.
    #[error("sentinel token must not be empty")]
    EmptySentinel,
    /// The dispatcher cannot poll on a zero interval.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
