//! Touch Sessions
//!
//! A [`TouchSession`] accumulates the contacts of one in-progress touch
//! interaction on one device. The [`SessionStore`] holds at most one active
//! session per device and is owned by the tracker.

use std::collections::HashMap;

use super::contact::{DeviceId, TouchContact, TouchPhase};

/// In-progress touch interaction on a single device
#[derive(Debug, Clone)]
pub struct TouchSession {
    /// Number of contiguous leading Down contacts
    finger_count: u32,

    /// Contacts in arrival order (append-only)
    contacts: Vec<TouchContact>,

    /// Set once a single-finger session moved past the drag threshold
    dragging: bool,
}

impl TouchSession {
    /// Start a session from its initiating Down contact
    pub fn begin(down: TouchContact) -> Self {
        debug_assert_eq!(down.phase, TouchPhase::Down);
        Self {
            finger_count: 1,
            contacts: vec![down],
            dragging: false,
        }
    }

    /// Number of fingers placed in the leading Down run
    pub fn finger_count(&self) -> u32 {
        self.finger_count
    }

    /// All contacts of the session, oldest first
    pub fn contacts(&self) -> &[TouchContact] {
        &self.contacts
    }

    /// The initiating Down contact
    pub fn first_contact(&self) -> &TouchContact {
        &self.contacts[0]
    }

    /// Most recently appended contact
    pub fn last_contact(&self) -> &TouchContact {
        // begin() guarantees at least one contact
        &self.contacts[self.contacts.len() - 1]
    }

    /// Whether the leading Down run is still unbroken
    pub fn is_down_contiguous(&self) -> bool {
        self.last_contact().phase == TouchPhase::Down
    }

    /// Reference point for displacement: the first Motion sample after the
    /// initiating Down, or the Down itself while no Motion has been recorded
    pub fn motion_origin(&self) -> &TouchContact {
        self.contacts.get(1).unwrap_or(&self.contacts[0])
    }

    /// Whether the session has been classified as a drag
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Register another finger in the leading Down run
    pub(crate) fn add_finger(&mut self, down: TouchContact) {
        self.finger_count += 1;
        self.contacts.push(down);
    }

    /// Append a contact
    ///
    /// Drag samples are appended too, not only those within the thresholds;
    /// once dragging, the latch decides the outcome and the samples are
    /// history only.
    pub(crate) fn push(&mut self, contact: TouchContact) {
        self.contacts.push(contact);
    }

    /// Latch the session as a drag until Up; it can no longer long-press
    pub(crate) fn mark_dragging(&mut self) {
        self.dragging = true;
    }
}

/// Per-device session table
///
/// Sessions are removed deterministically by the tracker, so the store is
/// bounded by the number of devices touched concurrently.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<DeviceId, TouchSession>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Active session for a device
    pub fn get(&self, device: &DeviceId) -> Option<&TouchSession> {
        self.sessions.get(device)
    }

    /// Mutable access to the active session for a device
    pub fn get_mut(&mut self, device: &DeviceId) -> Option<&mut TouchSession> {
        self.sessions.get_mut(device)
    }

    /// Install a session, replacing any previous one for the device
    pub fn put(&mut self, device: DeviceId, session: TouchSession) {
        self.sessions.insert(device, session);
    }

    /// Remove and return the session for a device
    pub fn remove(&mut self, device: &DeviceId) -> Option<TouchSession> {
        self.sessions.remove(device)
    }

    /// Whether a device currently has a session
    pub fn contains(&self, device: &DeviceId) -> bool {
        self.sessions.contains_key(device)
    }

    /// Number of active sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no device has an active session
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop all sessions
    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_begin() {
        let session = TouchSession::begin(TouchContact::down("dev0", 0, 1.0, 2.0));

        assert_eq!(session.finger_count(), 1);
        assert_eq!(session.contacts().len(), 1);
        assert!(session.is_down_contiguous());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_motion_origin_falls_back_to_down() {
        let mut session = TouchSession::begin(TouchContact::down("dev0", 0, 100.0, 100.0));
        assert_eq!(session.motion_origin().phase, TouchPhase::Down);

        session.push(TouchContact::motion("dev0", 10, 105.0, 100.0));
        session.push(TouchContact::motion("dev0", 20, 107.0, 100.0));

        assert_eq!(session.motion_origin().timestamp, 10);
        assert!(!session.is_down_contiguous());
    }

    #[test]
    fn test_store_put_get_remove() {
        let mut store = SessionStore::new();
        let dev = DeviceId::from("dev0");

        assert!(store.is_empty());
        store.put(
            dev.clone(),
            TouchSession::begin(TouchContact::down("dev0", 0, 0.0, 0.0)),
        );
        assert!(store.contains(&dev));
        assert_eq!(store.len(), 1);

        store.get_mut(&dev).unwrap().add_finger(TouchContact::down("dev0", 1, 0.0, 0.0));
        assert_eq!(store.get(&dev).unwrap().finger_count(), 2);

        assert!(store.remove(&dev).is_some());
        assert!(store.remove(&dev).is_none());
        assert!(store.is_empty());
    }
}
