//! Touch Contact Types
//!
//! Decoded touch-contact records as delivered by a contact source: one
//! Down/Motion/Up sample for one finger on one device at one instant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque touch device identifier (typically the device node, e.g. `/dev/input/event7`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Phase of a single touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Finger placed on the surface
    Down,
    /// Finger moved while touching
    Motion,
    /// Finger lifted
    Up,
}

/// One touch-contact event
///
/// Immutable once produced. `timestamp` is a monotonic device clock in
/// milliseconds; `x`/`y` are device coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchContact {
    /// Device the contact originated from
    pub device_id: DeviceId,
    /// Contact phase
    pub phase: TouchPhase,
    /// Monotonic timestamp (ms)
    pub timestamp: u64,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl TouchContact {
    /// Create a contact
    pub fn new(
        device_id: impl Into<DeviceId>,
        phase: TouchPhase,
        timestamp: u64,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            phase,
            timestamp,
            x,
            y,
        }
    }

    /// Shorthand for a Down contact
    pub fn down(device_id: impl Into<DeviceId>, timestamp: u64, x: f64, y: f64) -> Self {
        Self::new(device_id, TouchPhase::Down, timestamp, x, y)
    }

    /// Shorthand for a Motion contact
    pub fn motion(device_id: impl Into<DeviceId>, timestamp: u64, x: f64, y: f64) -> Self {
        Self::new(device_id, TouchPhase::Motion, timestamp, x, y)
    }

    /// Shorthand for an Up contact
    pub fn up(device_id: impl Into<DeviceId>, timestamp: u64, x: f64, y: f64) -> Self {
        Self::new(device_id, TouchPhase::Up, timestamp, x, y)
    }

    /// Per-axis displacement `(dx, dy)` of this contact relative to `origin`
    pub fn displacement_from(&self, origin: &TouchContact) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_deserialize() {
        let json = r#"{"device_id":"dev0","phase":"motion","timestamp":50,"x":101.0,"y":99.5}"#;
        let contact: TouchContact = serde_json::from_str(json).unwrap();

        assert_eq!(contact.device_id.as_str(), "dev0");
        assert_eq!(contact.phase, TouchPhase::Motion);
        assert_eq!(contact.timestamp, 50);
        assert_eq!(contact.y, 99.5);
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let json = r#"{"device_id":"dev0","phase":"hover","timestamp":0,"x":0.0,"y":0.0}"#;
        assert!(serde_json::from_str::<TouchContact>(json).is_err());
    }

    #[test]
    fn test_displacement() {
        let origin = TouchContact::down("dev0", 0, 100.0, 100.0);
        let moved = TouchContact::motion("dev0", 10, 130.0, 95.0);

        assert_eq!(moved.displacement_from(&origin), (30.0, -5.0));
    }
}
