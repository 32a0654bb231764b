//! Explicit shared state passed to the server, dispatcher, and handlers.

use std::sync::{Arc, Mutex, PoisonError};

use scriptport_config::{ConfigError, HandlerVariant, ServerConfig};

use crate::bridge::{HostLog, ScriptBridge};
use crate::handler::{self, RequestHandler};
use crate::queue::RequestQueue;

/// Shared collaborators for one command-socket instance.
///
/// Replaces the ambient runtime singleton of earlier designs: every
/// component receives the context at construction time, so multiple
/// independent instances can coexist and tests can wire their own bridges.
pub struct SessionContext {
    config: ServerConfig,
    queue: RequestQueue,
    bridge: Arc<dyn ScriptBridge>,
    host_log: Arc<dyn HostLog>,
    variant: Mutex<HandlerVariant>,
}

impl SessionContext {
    /// Builds a context from a validated configuration and host bridges.
    pub fn new(
        config: ServerConfig,
        bridge: Arc<dyn ScriptBridge>,
        host_log: Arc<dyn HostLog>,
    ) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        let variant = Mutex::new(config.handler);
        Ok(Arc::new(Self {
            config,
            queue: RequestQueue::new(),
            bridge,
            host_log,
            variant,
        }))
    }

    /// Resolved configuration for this instance.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Queue shared by connection threads and the dispatcher tick.
    #[must_use]
    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    /// Host script-execution bridge.
    #[must_use]
    pub fn bridge(&self) -> &dyn ScriptBridge {
        self.bridge.as_ref()
    }

    /// Host logging bridge.
    #[must_use]
    pub fn host_log(&self) -> &dyn HostLog {
        self.host_log.as_ref()
    }

    /// Currently selected handler variant.
    #[must_use]
    pub fn handler_variant(&self) -> HandlerVariant {
        *self.lock_variant()
    }

    /// Selects the handler variant for subsequently accepted connections.
    ///
    /// Live connections keep the variant they were accepted under.
    pub fn set_handler_variant(&self, variant: HandlerVariant) {
        *self.lock_variant() = variant;
    }

    /// Builds a handler for the currently selected variant.
    ///
    /// The accept loop calls this once per accepted connection and the
    /// dispatcher once per tick, so a variant change never retargets work
    /// already in flight.
    #[must_use]
    pub fn active_handler(self: &Arc<Self>) -> Arc<dyn RequestHandler> {
        handler::build(self.handler_variant(), Arc::clone(self))
    }

    fn lock_variant(&self) -> std::sync::MutexGuard<'_, HandlerVariant> {
        self.variant
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SessionContext")
            .field("config", &self.config)
            .field("queued", &self.queue.len())
            .field("variant", &self.handler_variant())
            .finish_non_exhaustive()
    }
}
