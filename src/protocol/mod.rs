//! Gesture Event Wire Encoding
//!
//! Native gestures and touch classifications share one three-field shape,
//! `(name, direction, fingers)`, all `i32`, so downstream consumers need a
//! single subscription surface. This is the payload of the D-Bus `Event`
//! signal and the input of every action sink.
//!
//! | Field       | Values                                                       |
//! |-------------|--------------------------------------------------------------|
//! | `name`      | 100 swipe, 101 pinch, 102 touch long-press                   |
//! | `direction` | 10 up, 11 down, 12 left, 13 right, 14 in, 15 out, 0 none     |
//! | `fingers`   | finger count as reported                                     |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric codes used on the wire
pub mod codes {
    /// Swipe gesture
    pub const NAME_SWIPE: i32 = 100;
    /// Pinch gesture
    pub const NAME_PINCH: i32 = 101;
    /// Single-finger long-press (right-click equivalent)
    pub const NAME_TOUCH_LONG_PRESS: i32 = 102;

    /// No direction (touch classifications)
    pub const DIRECTION_NONE: i32 = 0;
    /// Up
    pub const DIRECTION_UP: i32 = 10;
    /// Down
    pub const DIRECTION_DOWN: i32 = 11;
    /// Left
    pub const DIRECTION_LEFT: i32 = 12;
    /// Right
    pub const DIRECTION_RIGHT: i32 = 13;
    /// Pinch in
    pub const DIRECTION_IN: i32 = 14;
    /// Pinch out
    pub const DIRECTION_OUT: i32 = 15;
}

/// Encoded gesture or classification event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Gesture name / action identifier
    pub name: i32,
    /// Direction or classification code
    pub direction: i32,
    /// Finger count
    pub fingers: i32,
}

impl GestureEvent {
    /// Create an encoded event
    pub fn new(name: i32, direction: i32, fingers: i32) -> Self {
        Self {
            name,
            direction,
            fingers,
        }
    }

    /// Encoded single-finger long-press
    pub fn long_press() -> Self {
        Self::new(codes::NAME_TOUCH_LONG_PRESS, codes::DIRECTION_NONE, 1)
    }

    /// Whether this event encodes a touch long-press
    pub fn is_long_press(&self) -> bool {
        self.name == codes::NAME_TOUCH_LONG_PRESS
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.direction, self.fingers)
    }
}
