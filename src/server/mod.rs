//! Gesture Daemon
//!
//! Wires contact sources, the touch session tracker, the native gesture relay
//! and the action dispatcher together.
//!
//! # Architecture
//!
//! ```text
//! source task ─┐
//! source task ─┼──> event channel (256) ──> daemon loop ──> ActionDispatcher
//! source task ─┘    single consumer           │ Touch   -> TouchSessionTracker
//!                                             │ Gesture -> gesture::relay
//! ```
//!
//! The daemon loop is the only owner of the tracker, which serializes all
//! per-device session updates. Dispatch is fire-and-forget: `submit` never
//! awaits, so sink latency cannot delay classification.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::actions::{ActionDispatcher, ActionSink, DispatchStats, KeyChordSink};
use crate::config::Config;
use crate::dbus::DbusSignalSink;
use crate::input::{relay, Outcome, TouchSessionTracker, TrackerStats};
use crate::protocol::GestureEvent;
use crate::source::{spawn_source, ContactSource, SourceEvent};

/// Capacity of the source → daemon event channel
const EVENT_QUEUE_SIZE: usize = 256;

/// Counters reported when the daemon stops
#[derive(Debug, Clone, Default)]
pub struct DaemonReport {
    /// Tracker counters
    pub tracker: TrackerStats,
    /// Dispatcher counters
    pub dispatch: DispatchStats,
}

impl DaemonReport {
    /// Log the report
    pub fn log(&self) {
        info!("=== Gesture Daemon Summary ===");
        info!("  Contacts processed: {}", self.tracker.events_processed);
        info!("  Sessions started: {}", self.tracker.sessions_started);
        info!("  Sessions discarded: {}", self.tracker.sessions_discarded);
        info!("  Orphaned contacts: {}", self.tracker.orphaned_events);
        info!("  Long presses: {}", self.tracker.long_presses);
        info!("  Drags: {}", self.tracker.drags);
        info!(
            "  Multi-finger releases: {}",
            self.tracker.multi_finger_releases
        );
        info!(
            "  Dispatch: {} submitted, {} delivered, {} failed, {} dropped",
            self.dispatch.submitted,
            self.dispatch.delivered,
            self.dispatch.failed,
            self.dispatch.dropped
        );
    }
}

/// Touch gesture daemon
pub struct GestureDaemon {
    tracker: TouchSessionTracker,
    dispatcher: ActionDispatcher,
}

impl GestureDaemon {
    /// Create the daemon with its production sinks
    ///
    /// Fails if the D-Bus service cannot be registered.
    pub async fn new(config: Config) -> Result<Self> {
        let mut sinks: Vec<Arc<dyn ActionSink>> = Vec::new();

        sinks.push(Arc::new(DbusSignalSink::connect(&config.bus).await?));

        if config.actions.enabled {
            info!(
                "Local actions enabled via '{}' ({} binding(s))",
                config.actions.command,
                config.actions.bindings.len()
            );
            sinks.push(Arc::new(KeyChordSink::from_config(&config.actions)));
        } else {
            info!("Local action execution disabled");
        }

        Ok(Self::with_sinks(&config, sinks))
    }

    /// Create the daemon with explicit sinks
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_sinks(config: &Config, sinks: Vec<Arc<dyn ActionSink>>) -> Self {
        let tracker_config = config.gesture.to_tracker_config();
        info!(
            "Touch thresholds: drag > {}px, long press > {}ms",
            tracker_config.drag_threshold_px, tracker_config.long_press_ms
        );

        Self {
            tracker: TouchSessionTracker::new(tracker_config),
            dispatcher: ActionDispatcher::new(sinks, config.actions.queue_size),
        }
    }

    /// Tracker (read-only)
    pub fn tracker(&self) -> &TouchSessionTracker {
        &self.tracker
    }

    /// Handle one source event, returning the event handed to the dispatcher
    pub fn process(&mut self, event: SourceEvent) -> Option<GestureEvent> {
        let encoded = match event {
            SourceEvent::Touch(contact) => match self.tracker.handle(contact) {
                Outcome::None => None,
                outcome => {
                    debug!("Touch outcome: {:?}", outcome);
                    outcome.to_event()
                }
            },
            SourceEvent::Gesture(gesture) => Some(relay(gesture)),
        }?;

        if let Err(e) = self.dispatcher.submit(encoded) {
            warn!("Failed to dispatch {}: {}", encoded, e);
        }
        Some(encoded)
    }

    /// Run until every source is exhausted or a shutdown signal arrives
    pub async fn run(mut self, sources: Vec<Box<dyn ContactSource>>) -> Result<DaemonReport> {
        if sources.is_empty() {
            anyhow::bail!("No input sources configured");
        }

        let (tx, mut rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let handles: Vec<_> = sources
            .into_iter()
            .map(|source| {
                info!("Reading input from {}", source.name());
                spawn_source(source, tx.clone())
            })
            .collect();
        drop(tx);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => {
                        self.process(event);
                    }
                    None => {
                        info!("All input sources finished");
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        // Sources reading stdin never finish on their own
        for handle in handles {
            handle.abort();
        }

        let tracker = self.tracker.stats().clone();
        let dispatch = self.dispatcher.shutdown().await;

        let report = DaemonReport { tracker, dispatch };
        report.log();
        Ok(report)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MockActionSink;
    use crate::input::{GestureDirection, GestureName, NativeGesture, TouchContact};

    fn daemon_with(sink: MockActionSink) -> GestureDaemon {
        GestureDaemon::with_sinks(&Config::default(), vec![Arc::new(sink)])
    }

    #[tokio::test]
    async fn test_native_gesture_relayed() {
        let mut sink = MockActionSink::new();
        sink.expect_deliver()
            .withf(|event| *event == GestureEvent::new(100, 13, 4))
            .times(1)
            .returning(|_| Ok(()));
        let mut daemon = daemon_with(sink);

        let dispatched = daemon.process(SourceEvent::Gesture(NativeGesture::new(
            GestureName::Swipe,
            GestureDirection::Right,
            4,
        )));
        assert_eq!(dispatched, Some(GestureEvent::new(100, 13, 4)));

        daemon.dispatcher.shutdown().await;
    }

    #[tokio::test]
    async fn test_drag_and_multi_finger_release_not_dispatched() {
        let mut sink = MockActionSink::new();
        sink.expect_deliver().times(0);
        let mut daemon = daemon_with(sink);

        daemon.process(SourceEvent::Touch(TouchContact::down("dev0", 0, 100.0, 100.0)));
        assert_eq!(
            daemon.process(SourceEvent::Touch(TouchContact::motion("dev0", 10, 130.0, 100.0))),
            None
        );

        daemon.process(SourceEvent::Touch(TouchContact::down("dev1", 0, 0.0, 0.0)));
        daemon.process(SourceEvent::Touch(TouchContact::down("dev1", 5, 0.0, 0.0)));
        assert_eq!(
            daemon.process(SourceEvent::Touch(TouchContact::up("dev1", 20, 0.0, 0.0))),
            None
        );

        let stats = daemon.dispatcher.shutdown().await;
        assert_eq!(stats.submitted, 0);
    }

    #[tokio::test]
    async fn test_long_press_dispatched_once() {
        let mut sink = MockActionSink::new();
        sink.expect_deliver()
            .withf(|event| event.is_long_press())
            .times(1)
            .returning(|_| Ok(()));
        let mut daemon = daemon_with(sink);

        daemon.process(SourceEvent::Touch(TouchContact::down("dev0", 0, 100.0, 100.0)));
        daemon.process(SourceEvent::Touch(TouchContact::motion("dev0", 50, 101.0, 101.0)));
        daemon.process(SourceEvent::Touch(TouchContact::motion("dev0", 350, 102.0, 99.0)));
        daemon.process(SourceEvent::Touch(TouchContact::motion("dev0", 700, 102.0, 99.0)));

        assert!(daemon.tracker().sessions().is_empty());
        daemon.dispatcher.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_without_sources_fails() {
        let daemon = daemon_with(MockActionSink::new());
        assert!(daemon.run(Vec::new()).await.is_err());
    }
}
