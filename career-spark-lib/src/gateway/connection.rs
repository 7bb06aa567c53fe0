use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::telemetry::Metrics;

/// Counts in-flight API connections so shutdown can wait for them to drain
pub struct ConnectionTracker {
    active: Arc<AtomicUsize>,
    closed_tx: watch::Sender<()>,
}

impl ConnectionTracker {
    pub fn new() -> (Self, watch::Receiver<()>) {
        let (closed_tx, closed_rx) = watch::channel(());
        (Self { active: Arc::new(AtomicUsize::new(0)), closed_tx }, closed_rx)
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Register a new connection; the count drops when the guard does
    pub fn track(&self, metrics: Option<&Arc<Metrics>>) -> ConnectionGuard {
        self.active.fetch_add(1, Ordering::Relaxed);

        if let Some(m) = metrics {
            m.connections_total.add(1, &[]);
            m.connections_active.add(1, &[]);
        }

        ConnectionGuard {
            counter: self.active.clone(),
            notifier: self.closed_tx.clone(),
            connections_active: metrics.map(|m| m.connections_active.clone()),
        }
    }
}

/// Guard to decrement the active connections counter when dropped.
/// Notifies when the last connection closes.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
    connections_active: Option<opentelemetry::metrics::UpDownCounter<i64>>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let remaining = self.counter.fetch_sub(1, Ordering::Relaxed);
        if let Some(ref counter) = self.connections_active {
            counter.add(-1, &[]);
        }
        if remaining == 1 {
            let _ = self.notifier.send(());
        }
    }
}
