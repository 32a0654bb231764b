//! Structured telemetry initialisation for embedding hosts.
//!
//! Hosts without their own `tracing` subscriber call [`initialise`] once
//! during plugin load; hosts that already own a subscriber skip this and
//! the crate's spans land wherever the host routed them.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use scriptport_config::{LogFormat, ServerConfig};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: only the first invocation installs the
/// subscriber; later calls return a fresh [`TelemetryHandle`] without
/// touching global state.
///
/// # Examples
///
/// ```rust
/// use scriptport::initialise;
/// use scriptport_config::ServerConfig;
///
/// # fn main() -> Result<(), scriptport::TelemetryError> {
/// let config = ServerConfig::default();
/// let first = initialise(&config)?;
/// let second = initialise(&config)?;
///
/// // Both handles remain usable; only the first call installs
/// // telemetry.
/// drop(first);
/// drop(second);
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &ServerConfig) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(config: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format {
        LogFormat::Json => {
            let json = builder(filter).json().flatten_event(true).finish();
            Box::new(json)
        }
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_idempotent() {
        let config = ServerConfig::default();
        initialise(&config).expect("first initialise");
        initialise(&config).expect("second initialise");
    }

    #[test]
    fn rejects_a_malformed_filter_expression() {
        let config = ServerConfig {
            log_filter: "]]not a filter[[".to_string(),
            ..ServerConfig::default()
        };
        // The guard may already hold a subscriber from another test; probe
        // the filter parser directly to keep this deterministic.
        assert!(EnvFilter::try_new(&config.log_filter).is_err());
    }
}
