//! Default stacking variant: queues raw chunks, routes and executes them.

use std::net::TcpStream;
use std::sync::Arc;

use crate::bridge::LogSeverity;
use crate::context::SessionContext;
use crate::router::{ScriptDirective, classify};

use super::{RequestHandler, stack_chunks};

/// Handler that turns queued payloads into script executions.
///
/// The read half is identical to the logging variant. On the tick, each
/// dequeued payload is classified as either an existing script file path
/// or a `LANGUAGE | CODE` directive and handed to the host bridge. A
/// payload matching neither is dropped, but the drop is surfaced through
/// the host log so malformed input is not an invisible failure.
pub(crate) struct StackHandler {
    context: Arc<SessionContext>,
}

impl StackHandler {
    pub(crate) fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

impl RequestHandler for StackHandler {
    fn handle_connection(&self, stream: TcpStream) {
        stack_chunks(&self.context, stream);
    }

    fn process_data(&self) {
        for payload in self.context.queue().drain_all() {
            match classify(&payload) {
                Some(directive) => execute_directive(&self.context, &directive),
                None => self.context.host_log().log(
                    &format!("discarding unroutable payload: '{}'", payload.trim()),
                    LogSeverity::Warning,
                ),
            }
        }
    }
}

/// Executes one directive, logging the outcome through the host bridge.
///
/// Bridge failures are contained here so one bad payload cannot abort the
/// remainder of the tick's drain loop.
pub(super) fn execute_directive(context: &SessionContext, directive: &ScriptDirective) {
    let (result, label) = match directive {
        ScriptDirective::FilePath(path) => (
            context.bridge().execute_script_file(path),
            path.to_string(),
        ),
        ScriptDirective::LanguageCode { language, code } => (
            context.bridge().execute_script_code(code, *language),
            language.to_string(),
        ),
    };
    match result {
        Ok(value) => {
            let rendered = value.as_deref().unwrap_or("<no value>");
            context.host_log().log(
                &format!("request return value: '{rendered}' ({label})"),
                LogSeverity::Verbose,
            );
        }
        Err(error) => context
            .host_log()
            .log(&format!("{error} ({label})"), LogSeverity::Error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use camino::Utf8Path;
    use mockall::mock;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};
    use scriptport_config::ServerConfig;

    use crate::bridge::{ScriptBridge, ScriptBridgeError, ScriptValue};
    use crate::context::SessionContext;
    use crate::router::ScriptLanguage;
    use crate::test_support::RecordingLog;

    use super::*;

    mock! {
        Bridge {}
        impl ScriptBridge for Bridge {
            fn execute_script_file(&self, path: &Utf8Path) -> Result<ScriptValue, ScriptBridgeError>;
            fn execute_script_code(
                &self,
                code: &str,
                language: ScriptLanguage,
            ) -> Result<ScriptValue, ScriptBridgeError>;
        }
    }

    #[fixture]
    fn log() -> Arc<RecordingLog> {
        Arc::new(RecordingLog::default())
    }

    fn context_with(bridge: MockBridge, log: &Arc<RecordingLog>) -> Arc<SessionContext> {
        SessionContext::new(ServerConfig::default(), Arc::new(bridge), log.sink())
            .expect("context")
    }

    #[rstest]
    fn code_directive_reaches_the_bridge(log: Arc<RecordingLog>) {
        let mut bridge = MockBridge::new();
        bridge
            .expect_execute_script_code()
            .with(eq("LogMessage(\"Pouet\")"), eq(ScriptLanguage::JScript))
            .once()
            .returning(|_, _| Ok(Some("Pouet".to_string())));

        let context = context_with(bridge, &log);
        context
            .queue()
            .append("JScript | LogMessage(\"Pouet\")".to_string());
        StackHandler::new(Arc::clone(&context)).process_data();

        let messages = log.snapshot();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, LogSeverity::Verbose);
        assert!(messages[0].0.contains("'Pouet'"));
    }

    #[rstest]
    fn file_path_wins_over_language_grammar(log: Arc<RecordingLog>) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("JScript | import.js");
        std::fs::write(&path, b"// contents irrelevant").expect("write file");
        let payload = path.to_str().expect("utf8 path").to_string();

        let mut bridge = MockBridge::new();
        let expected = payload.clone();
        bridge
            .expect_execute_script_file()
            .withf(move |candidate| candidate.as_str() == expected)
            .once()
            .returning(|_| Ok(None));
        bridge.expect_execute_script_code().never();

        let context = context_with(bridge, &log);
        context.queue().append(payload);
        StackHandler::new(Arc::clone(&context)).process_data();
    }

    #[rstest]
    fn unroutable_payload_is_dropped_and_surfaced(log: Arc<RecordingLog>) {
        let mut bridge = MockBridge::new();
        bridge.expect_execute_script_file().never();
        bridge.expect_execute_script_code().never();

        let context = context_with(bridge, &log);
        context.queue().append("not a path | nonsense".to_string());
        StackHandler::new(Arc::clone(&context)).process_data();

        assert!(context.queue().is_empty());
        let messages = log.snapshot();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, LogSeverity::Warning);
        assert!(messages[0].0.contains("unroutable"));
    }

    #[rstest]
    fn bridge_failure_does_not_abort_the_drain(log: Arc<RecordingLog>) {
        let mut bridge = MockBridge::new();
        bridge
            .expect_execute_script_code()
            .with(eq("boom()"), eq(ScriptLanguage::Python))
            .once()
            .returning(|_, _| Err(ScriptBridgeError::new("interpreter fault")));
        bridge
            .expect_execute_script_code()
            .with(eq("fine()"), eq(ScriptLanguage::Python))
            .once()
            .returning(|_, _| Ok(None));

        let context = context_with(bridge, &log);
        context.queue().append("Python | boom()".to_string());
        context.queue().append("Python | fine()".to_string());
        StackHandler::new(Arc::clone(&context)).process_data();

        let messages = log.snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].1, LogSeverity::Error);
        assert_eq!(messages[1].1, LogSeverity::Verbose);
    }
}
