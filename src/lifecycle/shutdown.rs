//! Shutdown coordination for the gateway.
//!
//! One broadcast channel fans the stop signal out to the server task (and
//! whatever else subscribes, e.g. the integration tests that drive it).
//! Triggering reports how many listeners are about to drain.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal, logging how many tasks will drain.
    pub fn trigger(&self) {
        let listeners = self.tx.receiver_count();
        tracing::info!(listeners, "Shutdown triggered");
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
