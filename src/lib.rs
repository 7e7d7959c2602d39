//! # touch-gestured
//!
//! Touch gesture daemon for Linux desktops.
//!
//! Converts raw per-device touch contacts into a small set of semantic
//! gestures and relays natively recognized multi-finger gestures, publishing
//! both as one `(name, direction, fingers)` event stream.
//!
//! # Architecture
//!
//! ```text
//! touch-gestured
//!   ├─> Contact Sources (JSON lines from files / stdin)
//!   ├─> Touch Session Tracker (tap / drag / long-press / multi-finger)
//!   ├─> Native Gesture Relay (swipe / pinch passthrough)
//!   └─> Action Dispatcher
//!         ├─> D-Bus signal (com.deepin.daemon.Gesture.Event)
//!         └─> Key chord executor (xdotool)
//! ```
//!
//! # Data Flow
//!
//! **Touch Path:** Source → Tracker → Outcome → Encoding → Dispatcher → Sinks
//!
//! **Gesture Path:** Source → Relay → Encoding → Dispatcher → Sinks

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Action sinks and the dispatch queue
pub mod actions;

/// Daemon configuration
pub mod config;

/// D-Bus gesture service
pub mod dbus;

/// Touch contact model, session tracking and gesture relay
pub mod input;

/// Wire encoding of gesture events
pub mod protocol;

/// Main daemon implementation
pub mod server;

/// Contact sources
pub mod source;

/// Utility functions
pub mod utils;
