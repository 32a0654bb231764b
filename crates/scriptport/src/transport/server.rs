//! Lifecycle server owning the listening socket and accept loop.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::bridge::LogSeverity;
use crate::context::SessionContext;

use super::{ServerError, TRANSPORT_TARGET};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Command-socket server with a strict offline/online lifecycle.
///
/// While online, a background thread accepts connections and spawns one
/// detached handler thread per connection. `stop()` cancels the accept
/// loop and releases the listening socket only: in-flight connection
/// threads end naturally when their client disconnects or their framing
/// rule completes. A client that never sends and never closes therefore
/// parks its handler thread indefinitely — an intentional simplification
/// and a known resource-leak risk.
pub struct CommandServer {
    context: Arc<SessionContext>,
    state: ServerState,
}

enum ServerState {
    Offline,
    Online(AcceptHandle),
}

impl CommandServer {
    /// Builds an offline server around the shared context.
    #[must_use]
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self {
            context,
            state: ServerState::Offline,
        }
    }

    /// Whether the server is currently accepting connections.
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self.state, ServerState::Online(_))
    }

    /// Address the listening socket is bound to, while online.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            ServerState::Online(handle) => Some(handle.local_addr),
            ServerState::Offline => None,
        }
    }

    /// Binds the configured endpoint and begins accepting connections.
    ///
    /// Fails with [`ServerError::AlreadyOnline`] while online. A bind
    /// conflict on an address already in use is recoverable: it is logged
    /// as a warning and the server stays offline so the caller may retry.
    /// Any other bind failure is fatal and surfaces to the caller.
    pub fn start(&mut self) -> Result<(), ServerError> {
        if self.is_online() {
            self.report_lifecycle_misuse(&ServerError::AlreadyOnline);
            return Err(ServerError::AlreadyOnline);
        }

        let endpoint = &self.context.config().endpoint;
        let addr = resolve(&endpoint.host, endpoint.port)?;
        let listener = match TcpListener::bind(addr) {
            Ok(listener) => listener,
            Err(error) if error.kind() == io::ErrorKind::AddrInUse => {
                warn!(
                    target: TRANSPORT_TARGET,
                    %addr,
                    "address already in use; server stays offline"
                );
                self.context.host_log().log(
                    &format!("address {addr} is already in use; server stays offline"),
                    LogSeverity::Warning,
                );
                return Ok(());
            }
            Err(source) => return Err(ServerError::Bind { addr, source }),
        };
        listener
            .set_nonblocking(true)
            .map_err(|source| ServerError::NonBlocking { source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);
        let context = Arc::clone(&self.context);
        let thread = thread::spawn(move || run_accept_loop(&listener, &shutdown_flag, &context));

        self.state = ServerState::Online(AcceptHandle {
            shutdown,
            thread: Some(thread),
            local_addr,
        });
        info!(target: TRANSPORT_TARGET, %local_addr, "server online");
        Ok(())
    }

    /// Signals the accept loop to terminate and releases the socket.
    ///
    /// Fails with [`ServerError::NotOnline`] while offline. Does not
    /// cancel in-flight connection threads or abort in-progress script
    /// execution.
    pub fn stop(&mut self) -> Result<(), ServerError> {
        let ServerState::Online(mut handle) =
            std::mem::replace(&mut self.state, ServerState::Offline)
        else {
            self.report_lifecycle_misuse(&ServerError::NotOnline);
            return Err(ServerError::NotOnline);
        };

        handle.shutdown.store(true, Ordering::SeqCst);
        let joined = match handle.thread.take() {
            Some(thread) => thread.join().map_err(|_| ServerError::AcceptThreadPanic),
            None => Ok(()),
        };
        info!(target: TRANSPORT_TARGET, "server offline");
        joined
    }

    fn report_lifecycle_misuse(&self, error: &ServerError) {
        warn!(target: TRANSPORT_TARGET, %error, "lifecycle misuse");
        self.context
            .host_log()
            .log(&error.to_string(), LogSeverity::Warning);
    }
}

struct AcceptHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl Drop for AcceptHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ServerError::Resolve {
            host: host.to_string(),
            port,
            source,
        })?;
    addrs.next().ok_or_else(|| ServerError::ResolveEmpty {
        host: host.to_string(),
        port,
    })
}

fn run_accept_loop(listener: &TcpListener, shutdown: &AtomicBool, context: &Arc<SessionContext>) {
    info!(
        target: TRANSPORT_TARGET,
        variant = %context.handler_variant(),
        "accept loop active"
    );
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => {
                last_error = None;
                if let Err(error) = stream.set_nonblocking(false) {
                    warn!(target: TRANSPORT_TARGET, %error, %peer, "failed to prepare stream");
                    continue;
                }
                // Capture the handler at accept time: a later variant
                // change must not retarget this connection.
                let handler = context.active_handler();
                thread::spawn(move || handler.handle_connection(stream));
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_BACKOFF);
            }
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(target: TRANSPORT_TARGET, %error, "socket accept error");
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
}
