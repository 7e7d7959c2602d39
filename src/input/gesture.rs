//! Native Gesture Relay
//!
//! Swipe and pinch gestures are recognized by the underlying input stack and
//! arrive here already classified. They are relayed unchanged into the shared
//! [`GestureEvent`] encoding; no state is kept and nothing is reinterpreted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::protocol::{codes, GestureEvent};

/// Kind of natively recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureName {
    /// Multi-finger swipe
    Swipe,
    /// Multi-finger pinch
    Pinch,
}

impl GestureName {
    /// Wire code for the gesture name
    pub fn code(self) -> i32 {
        match self {
            GestureName::Swipe => codes::NAME_SWIPE,
            GestureName::Pinch => codes::NAME_PINCH,
        }
    }
}

/// Direction of a natively recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureDirection {
    /// Swipe up
    Up,
    /// Swipe down
    Down,
    /// Swipe left
    Left,
    /// Swipe right
    Right,
    /// Pinch in
    In,
    /// Pinch out
    Out,
}

impl GestureDirection {
    /// Wire code for the direction
    pub fn code(self) -> i32 {
        match self {
            GestureDirection::Up => codes::DIRECTION_UP,
            GestureDirection::Down => codes::DIRECTION_DOWN,
            GestureDirection::Left => codes::DIRECTION_LEFT,
            GestureDirection::Right => codes::DIRECTION_RIGHT,
            GestureDirection::In => codes::DIRECTION_IN,
            GestureDirection::Out => codes::DIRECTION_OUT,
        }
    }

    /// Whether the direction can occur for the given gesture kind
    pub fn applies_to(self, name: GestureName) -> bool {
        match name {
            GestureName::Swipe => matches!(
                self,
                GestureDirection::Up
                    | GestureDirection::Down
                    | GestureDirection::Left
                    | GestureDirection::Right
            ),
            GestureName::Pinch => matches!(self, GestureDirection::In | GestureDirection::Out),
        }
    }
}

/// Gesture as reported by the native source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeGesture {
    /// Gesture kind
    pub name: GestureName,
    /// Gesture direction
    pub direction: GestureDirection,
    /// Number of fingers involved
    pub fingers: i32,
}

impl NativeGesture {
    /// Create a native gesture record
    pub fn new(name: GestureName, direction: GestureDirection, fingers: i32) -> Self {
        Self {
            name,
            direction,
            fingers,
        }
    }
}

/// Forward a native gesture into the shared output encoding
pub fn relay(gesture: NativeGesture) -> GestureEvent {
    debug!(
        "[{:?}] direction: {:?}, fingers: {}",
        gesture.name, gesture.direction, gesture.fingers
    );
    GestureEvent::new(gesture.name.code(), gesture.direction.code(), gesture.fingers)
}
