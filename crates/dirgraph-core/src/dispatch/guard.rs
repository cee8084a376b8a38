//! RAII guard that detaches pending local state when an attempt ends.

use crate::tracker::EntityTracker;
use std::ops::{Deref, DerefMut};

/// Detaches added/modified/deleted entities when dropped, including on unwind.
pub(super) struct PendingGuard<'a> {
    tracker: &'a mut EntityTracker,
}

impl<'a> PendingGuard<'a> {
    pub(super) fn new(tracker: &'a mut EntityTracker) -> Self {
        Self { tracker }
    }
}

impl Deref for PendingGuard<'_> {
    type Target = EntityTracker;

    fn deref(&self) -> &EntityTracker {
        &*self.tracker
    }
}

impl DerefMut for PendingGuard<'_> {
    fn deref_mut(&mut self) -> &mut EntityTracker {
        &mut *self.tracker
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let detached = self.tracker.detach_pending();
        if detached > 0 {
            tracing::debug!("detached {} pending entities after attempt", detached);
        }
    }
}
