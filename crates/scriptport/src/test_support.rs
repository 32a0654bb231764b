//! Shared test doubles for the crate's unit tests.

use std::sync::{Arc, Mutex};

use camino::Utf8Path;

use crate::bridge::{HostLog, LogSeverity, ScriptBridge, ScriptBridgeError, ScriptValue};
use crate::router::ScriptLanguage;

/// Bridge stub for tests that never reach script execution.
pub(crate) struct NullBridge;

impl ScriptBridge for NullBridge {
    fn execute_script_file(&self, _path: &Utf8Path) -> Result<ScriptValue, ScriptBridgeError> {
        Ok(None)
    }

    fn execute_script_code(
        &self,
        _code: &str,
        _language: ScriptLanguage,
    ) -> Result<ScriptValue, ScriptBridgeError> {
        Ok(None)
    }
}

/// Host log that records every message for later assertions.
#[derive(Default)]
pub(crate) struct RecordingLog {
    messages: Mutex<Vec<(String, LogSeverity)>>,
}

impl RecordingLog {
    /// Copy of the recorded messages in arrival order.
    pub(crate) fn snapshot(&self) -> Vec<(String, LogSeverity)> {
        self.messages.lock().expect("log lock").clone()
    }

    /// This recorder as a host-log trait object.
    pub(crate) fn sink(self: &Arc<Self>) -> Arc<dyn HostLog> {
        Arc::clone(self) as Arc<dyn HostLog>
    }
}

impl HostLog for RecordingLog {
    fn log(&self, message: &str, severity: LogSeverity) {
        self.messages
            .lock()
            .expect("log lock")
            .push((message.to_string(), severity));
    }
}
