//! Lifecycle supervision
//!
//! One supervisor owns the cancellation signal for the process. Both
//! termination paths — the Ctrl-C handler and the panic hook — converge on
//! its single `shutdown()` entry point, which is guarded by an atomic flag
//! so a second invocation (signal arriving during fault handling) is a
//! no-op. The event loops observe the signal through a watch channel and
//! exit between iterations; session close then runs exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

/// Owner of the process-wide shutdown signal
pub struct Supervisor {
    closed: AtomicBool,
    tx: watch::Sender<bool>,
}

impl Supervisor {
    /// Create the supervisor and the receiver the event loop watches
    pub fn new() -> (Arc<Self>, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        let supervisor = Arc::new(Self {
            closed: AtomicBool::new(false),
            tx,
        });
        (supervisor, rx)
    }

    /// Request shutdown.
    ///
    /// Returns true for the invocation that actually triggered it; later
    /// invocations are no-ops and return false.
    pub fn shutdown(&self) -> bool {
        if self
            .closed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let _ = self.tx.send(true);
            true
        } else {
            false
        }
    }

    /// Whether shutdown has been requested
    pub fn is_shutdown(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Another receiver for the shutdown signal
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Trigger the supervisor when the process receives a termination signal
pub fn spawn_signal_listener(supervisor: Arc<Supervisor>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown received.");
            supervisor.shutdown();
        }
    });
}

/// Trigger the supervisor from any uncaught panic.
///
/// The previous hook still runs afterwards so the panic message and
/// backtrace behavior are unchanged.
pub fn install_panic_hook(supervisor: Arc<Supervisor>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Uncaught panic: {}", info);
        supervisor.shutdown();
        previous(info);
    }));
}
