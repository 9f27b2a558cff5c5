//! Guest session accessors over the store.

use mensa_core::GuestId;

use super::StoreInner;
use crate::models::GuestSession;

impl StoreInner {
    /// Look up a guest session by ID.
    pub fn guest(&self, id: &GuestId) -> Option<&GuestSession> {
        self.guests.get(id)
    }

    pub(crate) fn guest_mut(&mut self, id: &GuestId) -> Option<&mut GuestSession> {
        self.guests.get_mut(id)
    }

    /// Insert a new guest session.
    pub fn insert_guest(&mut self, guest: GuestSession) {
        self.guests.insert(guest.guest_id.clone(), guest);
    }

    /// Remove a guest session, returning it if it existed.
    ///
    /// Removal is the commit point of a migration: once the session is
    /// gone, a second migration attempt observes `GuestNotFound`.
    pub fn remove_guest(&mut self, id: &GuestId) -> Option<GuestSession> {
        self.guests.remove(id)
    }
}
