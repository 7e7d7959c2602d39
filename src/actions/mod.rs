//! Action Dispatch
//!
//! Encoded gesture events leave the classification path here. The tracker
//! only decides *which* action a session implies; executing it (emitting a
//! D-Bus signal, synthesizing a key chord or a right-click) happens on a
//! separate worker task so a slow or failing action never stalls event
//! processing.
//!
//! # Architecture
//!
//! ```text
//! daemon loop                 ActionDispatcher                  Sinks
//! ━━━━━━━━━━━                 ━━━━━━━━━━━━━━━━                  ━━━━━
//!
//! submit(event) ──try_send──> bounded queue ──> worker task ──> DbusSignalSink
//!   never awaits              DROP on full         │       └──> KeyChordSink
//!                                                  │
//!                                       failures logged + counted,
//!                                       next event still delivered
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::protocol::GestureEvent;

pub mod error;
pub mod keychord;

pub use error::{DispatchError, Result};
pub use keychord::KeyChordSink;

/// Receiver of encoded gesture events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Sink name for logs
    fn name(&self) -> &'static str;

    /// Perform the effect for one event
    async fn deliver(&self, event: GestureEvent) -> Result<()>;
}

/// Dispatcher counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events accepted into the queue
    pub submitted: u64,
    /// Successful sink deliveries
    pub delivered: u64,
    /// Failed sink deliveries
    pub failed: u64,
    /// Events dropped because the queue was full
    pub dropped: u64,
}

/// Bounded queue plus worker task feeding every configured sink
pub struct ActionDispatcher {
    tx: mpsc::Sender<GestureEvent>,
    worker: JoinHandle<()>,
    stats: Arc<Mutex<DispatchStats>>,
}

impl ActionDispatcher {
    /// Start the dispatcher worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(sinks: Vec<Arc<dyn ActionSink>>, queue_size: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_size.max(1));
        let stats = Arc::new(Mutex::new(DispatchStats::default()));

        info!(
            "Action dispatcher started: {} sink(s), queue size {}",
            sinks.len(),
            queue_size
        );

        let worker = tokio::spawn(run_worker(sinks, rx, Arc::clone(&stats)));

        Self { tx, worker, stats }
    }

    /// Queue an event without waiting
    ///
    /// When the queue is full the event is dropped and counted.
    pub fn submit(&self, event: GestureEvent) -> Result<()> {
        match self.tx.try_send(event) {
            Ok(()) => {
                self.stats.lock().submitted += 1;
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                let dropped = {
                    let mut stats = self.stats.lock();
                    stats.dropped += 1;
                    stats.dropped
                };
                if dropped % 100 == 1 {
                    warn!("Action queue full - dropped {} event(s) total", dropped);
                }
                Err(DispatchError::QueueFull)
            }
            Err(TrySendError::Closed(_)) => Err(DispatchError::Closed),
        }
    }

    /// Current counters
    pub fn stats(&self) -> DispatchStats {
        self.stats.lock().clone()
    }

    /// Close the queue and wait for queued events to be delivered
    pub async fn shutdown(self) -> DispatchStats {
        let Self { tx, worker, stats } = self;
        drop(tx);

        if let Err(e) = worker.await {
            warn!("Action dispatcher worker ended abnormally: {}", e);
        }

        let snapshot = stats.lock().clone();
        snapshot
    }
}

async fn run_worker(
    sinks: Vec<Arc<dyn ActionSink>>,
    mut rx: mpsc::Receiver<GestureEvent>,
    stats: Arc<Mutex<DispatchStats>>,
) {
    while let Some(event) = rx.recv().await {
        for sink in &sinks {
            match sink.deliver(event).await {
                Ok(()) => stats.lock().delivered += 1,
                Err(e) => {
                    warn!("Action sink '{}' failed for {}: {}", sink.name(), event, e);
                    stats.lock().failed += 1;
                }
            }
        }
    }

    debug!("Action dispatcher worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    #[tokio::test]
    async fn test_delivers_to_every_sink() {
        let mut first = MockActionSink::new();
        first.expect_deliver().times(2).returning(|_| Ok(()));
        let mut second = MockActionSink::new();
        second.expect_deliver().times(2).returning(|_| Ok(()));

        let dispatcher = ActionDispatcher::new(vec![Arc::new(first), Arc::new(second)], 8);
        dispatcher.submit(GestureEvent::long_press()).unwrap();
        dispatcher.submit(GestureEvent::new(100, 10, 3)).unwrap();

        let stats = dispatcher.shutdown().await;
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.delivered, 4);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_delivery() {
        let mut sink = MockActionSink::new();
        let mut seq = Sequence::new();
        sink.expect_deliver()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(DispatchError::QueueFull));
        sink.expect_deliver()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_name().return_const("mock");

        let dispatcher = ActionDispatcher::new(vec![Arc::new(sink)], 8);
        dispatcher.submit(GestureEvent::long_press()).unwrap();
        dispatcher.submit(GestureEvent::long_press()).unwrap();

        let stats = dispatcher.shutdown().await;
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.delivered, 1);
    }

    #[tokio::test]
    async fn test_submit_passes_event_unchanged() {
        let mut sink = MockActionSink::new();
        sink.expect_deliver()
            .withf(|event| *event == GestureEvent::new(101, 14, 4))
            .times(1)
            .returning(|_| Ok(()));

        let dispatcher = ActionDispatcher::new(vec![Arc::new(sink)], 1);
        dispatcher.submit(GestureEvent::new(101, 14, 4)).unwrap();
        dispatcher.shutdown().await;
    }

    #[tokio::test]
    async fn test_no_sinks() {
        let dispatcher = ActionDispatcher::new(Vec::new(), 4);
        dispatcher.submit(GestureEvent::long_press()).unwrap();

        let stats = dispatcher.shutdown().await;
        assert_eq!(stats.submitted, 1);
        assert_eq!(stats.delivered, 0);
    }
}
