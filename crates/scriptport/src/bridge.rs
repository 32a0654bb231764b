//! Host-provided bridges for script execution and logging.
//!
//! Host APIs behind these traits are not thread-safe. Every call into them
//! is routed through the dispatcher tick; connection threads never invoke
//! them directly.

use camino::Utf8Path;
use thiserror::Error;

use crate::router::ScriptLanguage;

/// Opaque rendering of a script's return value, as reported by the host.
pub type ScriptValue = Option<String>;

/// Error raised by the host when script execution fails.
#[derive(Debug, Error)]
#[error("script execution failed: {message}")]
pub struct ScriptBridgeError {
    message: String,
}

impl ScriptBridgeError {
    /// Wraps a host-reported failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Script-execution capability supplied by the embedding host.
///
/// Implementations are only ever invoked from the dispatcher tick context.
pub trait ScriptBridge: Send + Sync {
    /// Executes a script file under the language the host infers from it.
    fn execute_script_file(&self, path: &Utf8Path) -> Result<ScriptValue, ScriptBridgeError>;

    /// Executes inline code under the named scripting language.
    fn execute_script_code(
        &self,
        code: &str,
        language: ScriptLanguage,
    ) -> Result<ScriptValue, ScriptBridgeError>;
}

/// Severity levels understood by the host's logging facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    /// Routine operational message.
    Info,
    /// Detail only interesting while diagnosing request flow.
    Verbose,
    /// Recoverable anomaly.
    Warning,
    /// Failure the host operator should see.
    Error,
}

/// Logging capability supplied by the embedding host.
pub trait HostLog: Send + Sync {
    /// Records a message in the host's log at the given severity.
    fn log(&self, message: &str, severity: LogSeverity);
}

/// Host log that forwards to the process-wide `tracing` subscriber.
///
/// Useful for hosts without a logging facility of their own, and as the
/// default sink in tests and demos.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHostLog;

impl TracingHostLog {
    /// Builds a new tracing-backed host log.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HostLog for TracingHostLog {
    fn log(&self, message: &str, severity: LogSeverity) {
        match severity {
            LogSeverity::Info => tracing::info!(target: "scriptport::host", "{message}"),
            LogSeverity::Verbose => tracing::debug!(target: "scriptport::host", "{message}"),
            LogSeverity::Warning => tracing::warn!(target: "scriptport::host", "{message}"),
            LogSeverity::Error => tracing::error!(target: "scriptport::host", "{message}"),
        }
    }
}
