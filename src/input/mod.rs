//! Touch Input Classification
//!
//! Turns a stream of decoded touch contacts into interaction semantics and
//! relays natively recognized multi-finger gestures.
//!
//! # Architecture
//!
//! ```text
//! Contact Source                      Native gesture source
//!       │                                      │
//!       ▼                                      ▼
//! ┌───────────────────────────┐      ┌──────────────────┐
//! │  TouchSessionTracker      │      │  gesture::relay  │
//! │  - SessionStore (per dev) │      │  (passthrough)   │
//! │  - tap/drag/long-press    │      └──────────────────┘
//! └───────────────────────────┘               │
//!       │ Outcome::to_event()                 │
//!       ▼                                     ▼
//!             GestureEvent (name, direction, fingers)
//!                          │
//!                          ▼
//!                  Action Dispatcher
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use touch_gestured::input::{Outcome, TouchContact, TouchSessionTracker, TrackerConfig};
//!
//! let mut tracker = TouchSessionTracker::new(TrackerConfig::default());
//!
//! tracker.handle(TouchContact::down("dev0", 0, 100.0, 100.0));
//! tracker.handle(TouchContact::motion("dev0", 50, 101.0, 101.0));
//! let outcome = tracker.handle(TouchContact::motion("dev0", 350, 102.0, 99.0));
//!
//! assert_eq!(outcome, Outcome::LongPressRightClick);
//! assert!(tracker.sessions().is_empty());
//! ```

pub mod contact;
pub mod error;
pub mod gesture;
pub mod session;
pub mod tracker;

pub use contact::{DeviceId, TouchContact, TouchPhase};
pub use error::{InputError, RecoveryAction, Result};
pub use gesture::{relay, GestureDirection, GestureName, NativeGesture};
pub use session::{SessionStore, TouchSession};
pub use tracker::{Outcome, TouchSessionTracker, TrackerConfig, TrackerStats};
