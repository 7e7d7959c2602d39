//! Touch Session Tracker
//!
//! Consumes the touch-contact stream, maintains one [`TouchSession`] per
//! device and classifies single-finger sessions into tap / drag / long-press.
//!
//! # State Machine
//!
//! ```text
//!                  Down                      Down (last contact Down)
//!   [no session] ───────> [session] ────────────────────> finger_count += 1
//!        ^                   │  │
//!        │   Up / broken     │  │ Motion (1 finger)
//!        │   Down / long-    │  ├─ |dx| or |dy| > drag threshold ──> Drag (latched)
//!        │   press           │  ├─ held > long-press threshold ─────> LongPressRightClick
//!        └───────────────────┘  └─ otherwise ───────────────────────> append
//! ```
//!
//! The long-press threshold is evaluated on incoming Motion samples only;
//! there is no timer. A finger that is lifted without moving again resolves
//! through the Up rule as a plain tap, which is not classified.
//!
//! Malformed input (Motion/Up without a session, Down after motion already
//! began) is discarded without error.

use tracing::{debug, trace};

use super::contact::{TouchContact, TouchPhase};
use super::session::{SessionStore, TouchSession};
use crate::protocol::GestureEvent;

/// Default displacement (device px, per axis) above which a contact is a drag
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 10.0;

/// Default hold duration (ms) above which a contact is a long-press
pub const DEFAULT_LONG_PRESS_MS: u64 = 300;

/// Classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Per-axis displacement threshold in device pixels
    pub drag_threshold_px: f64,
    /// Long-press duration threshold in milliseconds
    pub long_press_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

/// Result of handling one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing classified
    None,
    /// Single finger moved past the drag threshold (reserved, no action)
    Drag,
    /// Single finger held in place past the long-press threshold
    LongPressRightClick,
    /// Multi-finger session released (reserved, no action)
    MultiFingerRelease(u32),
}

impl Outcome {
    /// Encoded event to dispatch, if this outcome has a defined effect
    ///
    /// Only the long-press maps to an action; drag and multi-finger release
    /// are reported by the tracker but never dispatched.
    pub fn to_event(&self) -> Option<GestureEvent> {
        match self {
            Outcome::LongPressRightClick => Some(GestureEvent::long_press()),
            Outcome::None | Outcome::Drag | Outcome::MultiFingerRelease(_) => None,
        }
    }
}

/// Tracker counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Contacts handled
    pub events_processed: u64,
    /// Sessions created
    pub sessions_started: u64,
    /// Sessions discarded because of a non-contiguous Down
    pub sessions_discarded: u64,
    /// Motion/Up contacts that arrived without a session
    pub orphaned_events: u64,
    /// Drag classifications
    pub drags: u64,
    /// Long-press classifications
    pub long_presses: u64,
    /// Multi-finger releases
    pub multi_finger_releases: u64,
}

/// Per-device touch session tracker
///
/// Not internally synchronized: feed it from a single task. The daemon
/// funnels every contact source through one channel for this reason.
#[derive(Debug, Default)]
pub struct TouchSessionTracker {
    config: TrackerConfig,
    sessions: SessionStore,
    stats: TrackerStats,
}

impl TouchSessionTracker {
    /// Create a tracker with the given thresholds
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
            stats: TrackerStats::default(),
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Session store (read-only)
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Counters since creation
    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    /// Handle one contact and return its classification
    pub fn handle(&mut self, contact: TouchContact) -> Outcome {
        self.stats.events_processed += 1;

        if !self.sessions.contains(&contact.device_id) {
            return self.handle_without_session(contact);
        }

        match contact.phase {
            TouchPhase::Down => self.handle_down(contact),
            TouchPhase::Motion => self.handle_motion(contact),
            TouchPhase::Up => self.handle_up(contact),
        }
    }

    fn handle_without_session(&mut self, contact: TouchContact) -> Outcome {
        if contact.phase != TouchPhase::Down {
            self.stats.orphaned_events += 1;
            trace!(
                "Ignoring orphaned {:?} for device {}",
                contact.phase,
                contact.device_id
            );
            return Outcome::None;
        }

        debug!("Touch session started on {}", contact.device_id);
        self.stats.sessions_started += 1;
        self.sessions
            .put(contact.device_id.clone(), TouchSession::begin(contact));
        Outcome::None
    }

    fn handle_down(&mut self, contact: TouchContact) -> Outcome {
        let Some(session) = self.sessions.get_mut(&contact.device_id) else {
            return Outcome::None;
        };

        if session.is_down_contiguous() {
            session.add_finger(contact);
            return Outcome::None;
        }

        debug!(
            "Discarding session on {}: finger down after motion began",
            contact.device_id
        );
        self.stats.sessions_discarded += 1;
        self.sessions.remove(&contact.device_id);
        Outcome::None
    }

    fn handle_motion(&mut self, contact: TouchContact) -> Outcome {
        let Some(session) = self.sessions.get_mut(&contact.device_id) else {
            return Outcome::None;
        };

        if session.finger_count() > 1 {
            session.push(contact);
            return Outcome::None;
        }

        let (dx, dy) = contact.displacement_from(session.motion_origin());
        let threshold = self.config.drag_threshold_px;
        if dx.abs() > threshold || dy.abs() > threshold {
            if !session.is_dragging() {
                debug!(
                    "Drag on {}: dx={:.1}, dy={:.1}",
                    contact.device_id, dx, dy
                );
                self.stats.drags += 1;
            }
            session.mark_dragging();
            session.push(contact);
            return Outcome::Drag;
        }

        if session.is_dragging() {
            session.push(contact);
            return Outcome::Drag;
        }

        let held_ms = contact
            .timestamp
            .saturating_sub(session.first_contact().timestamp);
        if held_ms > self.config.long_press_ms {
            debug!(
                "Long press on {} after {}ms",
                contact.device_id, held_ms
            );
            self.stats.long_presses += 1;
            self.sessions.remove(&contact.device_id);
            return Outcome::LongPressRightClick;
        }

        session.push(contact);
        Outcome::None
    }

    fn handle_up(&mut self, contact: TouchContact) -> Outcome {
        let Some(session) = self.sessions.remove(&contact.device_id) else {
            return Outcome::None;
        };

        let fingers = session.finger_count();
        if fingers > 1 {
            debug!(
                "Multi-finger release on {} ({} fingers)",
                contact.device_id, fingers
            );
            self.stats.multi_finger_releases += 1;
            return Outcome::MultiFingerRelease(fingers);
        }

        Outcome::None
    }

    /// Drop every active session
    pub fn reset(&mut self) {
        self.sessions.clear();
    }
}
