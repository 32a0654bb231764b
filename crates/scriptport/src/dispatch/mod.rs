//! Host-driven polling that drains and executes queued work.
//!
//! The dispatcher runs entirely on the host's single logical thread: each
//! tick invokes the active handler variant's `process_data` exactly once,
//! which drains the request queue and calls into the host bridges. Host
//! APIs are not thread-safe, so forcing every bridge call through this one
//! context is the reason the queue/dispatcher separation exists at all.

mod scheduler;

use std::sync::Arc;

use crate::context::SessionContext;

pub use scheduler::{SchedulerError, ThreadScheduler, TickHandle, TickScheduler};

/// Periodic consumer of the request queue.
#[derive(Clone)]
pub struct Dispatcher {
    context: Arc<SessionContext>,
}

impl Dispatcher {
    /// Builds a dispatcher over the shared context.
    #[must_use]
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }

    /// Runs one tick: invokes the active variant's `process_data` once.
    ///
    /// Must be called from the host's scheduling context. Never blocks on
    /// network I/O; script execution runs synchronously with the caller.
    /// A tick arriving while a previous tick is still running is expected
    /// to be serialised by the host scheduler, not here.
    pub fn tick(&self) {
        self.context.active_handler().process_data();
    }

    /// Registers this dispatcher's tick with a periodic scheduler.
    ///
    /// The interval comes from the configuration (reference value 250 ms).
    /// Dropping the returned handle cancels the registration.
    #[must_use]
    pub fn subscribe(&self, scheduler: &dyn TickScheduler) -> TickHandle {
        let dispatcher = self.clone();
        scheduler.register(
            self.context.config().tick_interval(),
            Box::new(move || dispatcher.tick()),
        )
    }
}
