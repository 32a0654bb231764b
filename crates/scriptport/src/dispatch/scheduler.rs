//! Periodic-tick registration decoupled from any host timer API.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Periodic-callback registration facility.
///
/// Embedding hosts with a native timer facility implement this trait to
/// adapt it; tests and timer-less hosts can drive [`Dispatcher::tick`]
/// manually and skip scheduling altogether.
///
/// [`Dispatcher::tick`]: super::Dispatcher::tick
pub trait TickScheduler {
    /// Registers `callback` to run every `interval` until the returned
    /// handle is cancelled or dropped.
    fn register(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut() + Send + 'static>,
    ) -> TickHandle;
}

/// Cancellation guard for a registered periodic callback.
pub struct TickHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TickHandle {
    /// Builds a handle from a cancellation flag and an optional thread.
    ///
    /// Scheduler implementations that do not own a thread pass `None`; the
    /// flag alone carries the cancellation signal.
    #[must_use]
    pub fn new(shutdown: Arc<AtomicBool>, thread: Option<thread::JoinHandle<()>>) -> Self {
        Self { shutdown, thread }
    }

    /// Signals the registration to stop firing.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Waits for the scheduler's driving thread to finish, if it owns one.
    pub fn join(mut self) -> Result<(), SchedulerError> {
        self.shutdown();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| SchedulerError::ThreadPanic),
            None => Ok(()),
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Errors surfaced while tearing down a tick registration.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The driving thread panicked inside a tick callback.
    #[error("tick thread panicked")]
    ThreadPanic,
}

/// Scheduler that drives callbacks from a dedicated background thread.
///
/// Stands in for the host's own timer facility. Ticks never overlap: the
/// next sleep starts only after the callback returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    /// Builds a new thread-backed scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TickScheduler for ThreadScheduler {
    fn register(
        &self,
        interval: Duration,
        mut callback: Box<dyn FnMut() + Send + 'static>,
    ) -> TickHandle {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let thread = thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                callback();
                thread::sleep(interval);
            }
        });
        TickHandle::new(shutdown, Some(thread))
    }
}
