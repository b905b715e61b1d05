//! Cancellation signal for the console reader tasks.

use tokio::sync::broadcast;

/// Broadcast-based cancellation handle.
///
/// The readers end naturally when the child's streams close at exit; this
/// signal covers the case where the process is killed externally and the
/// streams never close from our side.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: broadcast::Sender<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger cancellation for all subscribers.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of reader tasks still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
