//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::input::tracker::{DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_LONG_PRESS_MS};
use crate::input::{GestureDirection, GestureName, TrackerConfig};
use crate::protocol::GestureEvent;

/// Touch classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Per-axis displacement (device px) above which a contact is a drag
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f64,

    /// Hold duration (ms) above which a contact is a long-press
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
}

fn default_drag_threshold_px() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}

fn default_long_press_ms() -> u64 {
    DEFAULT_LONG_PRESS_MS
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: default_drag_threshold_px(),
            long_press_ms: default_long_press_ms(),
        }
    }
}

impl GestureConfig {
    /// Tracker thresholds
    pub fn to_tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            drag_threshold_px: self.drag_threshold_px,
            long_press_ms: self.long_press_ms,
        }
    }
}

/// Which message bus to publish on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    /// Per-user session bus
    Session,
    /// System bus
    System,
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusType::Session => f.write_str("session"),
            BusType::System => f.write_str("system"),
        }
    }
}

/// D-Bus publication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Bus to connect to
    #[serde(default = "default_bus_type")]
    pub connection: BusType,

    /// Well-known name to own
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Object path of the exported gesture object
    #[serde(default = "default_object_path")]
    pub object_path: String,
}

fn default_bus_type() -> BusType {
    BusType::Session
}

fn default_service_name() -> String {
    "com.deepin.daemon.Gesture".to_string()
}

fn default_object_path() -> String {
    "/com/deepin/daemon/Gesture".to_string()
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            connection: default_bus_type(),
            service_name: default_service_name(),
            object_path: default_object_path(),
        }
    }
}

/// Gesture tuple to key chord binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureBinding {
    /// Gesture kind
    pub gesture: GestureName,
    /// Gesture direction
    pub direction: GestureDirection,
    /// Finger count
    pub fingers: i32,
    /// Key chord, e.g. `super+w`
    pub keys: String,
}

impl GestureBinding {
    /// Create a binding
    pub fn new(
        gesture: GestureName,
        direction: GestureDirection,
        fingers: i32,
        keys: impl Into<String>,
    ) -> Self {
        Self {
            gesture,
            direction,
            fingers,
            keys: keys.into(),
        }
    }

    /// Whether an encoded event triggers this binding
    pub fn matches(&self, event: &GestureEvent) -> bool {
        event.name == self.gesture.code()
            && event.direction == self.direction.code()
            && event.fingers == self.fingers
    }
}

/// Built-in gesture bindings
pub fn default_bindings() -> Vec<GestureBinding> {
    use GestureDirection::{Down, In, Left, Out, Right, Up};
    use GestureName::{Pinch, Swipe};

    vec![
        GestureBinding::new(Swipe, Up, 3, "super+w"),
        GestureBinding::new(Swipe, Up, 4, "super+Up"),
        GestureBinding::new(Swipe, Down, 3, "super+d"),
        GestureBinding::new(Swipe, Down, 4, "super+Down"),
        GestureBinding::new(Swipe, Left, 3, "alt+shift+Tab"),
        GestureBinding::new(Swipe, Left, 4, "super+Left"),
        GestureBinding::new(Swipe, Right, 3, "alt+Tab"),
        GestureBinding::new(Swipe, Right, 4, "super+Right"),
        GestureBinding::new(Pinch, In, 4, "super+s"),
        GestureBinding::new(Pinch, Out, 4, "super+s"),
    ]
}

/// Local action execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// Execute bound actions locally
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Dispatch queue capacity
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,

    /// Input synthesis program
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments for the long-press right-click (None = no local action)
    #[serde(default = "default_long_press_action")]
    pub long_press: Option<String>,

    /// Gesture to key chord bindings
    #[serde(default = "default_bindings")]
    pub bindings: Vec<GestureBinding>,
}

fn default_true() -> bool {
    true
}

fn default_queue_size() -> usize {
    32
}

fn default_command() -> String {
    "xdotool".to_string()
}

fn default_long_press_action() -> Option<String> {
    Some("click 3".to_string())
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            queue_size: default_queue_size(),
            command: default_command(),
            long_press: default_long_press_action(),
            bindings: default_bindings(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_matches() {
        let binding = GestureBinding::new(GestureName::Swipe, GestureDirection::Up, 3, "super+w");

        assert!(binding.matches(&GestureEvent::new(100, 10, 3)));
        assert!(!binding.matches(&GestureEvent::new(100, 10, 4)));
        assert!(!binding.matches(&GestureEvent::new(101, 10, 3)));
    }

    #[test]
    fn test_default_bindings_unique() {
        let bindings = default_bindings();
        for (i, a) in bindings.iter().enumerate() {
            for b in &bindings[i + 1..] {
                assert!(
                    !(a.gesture == b.gesture && a.direction == b.direction && a.fingers == b.fingers),
                    "duplicate binding {:?}",
                    a
                );
            }
        }
    }

    #[test]
    fn test_bus_type_display() {
        assert_eq!(BusType::Session.to_string(), "session");
        assert_eq!(BusType::System.to_string(), "system");
    }
}
