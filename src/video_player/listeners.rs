// SPDX-License-Identifier: MPL-2.0
//! Listener registry shared by the playback drivers.

use super::driver::{Notification, NotificationKind};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with each notification of the kind it was registered for.
pub type Listener = Box<dyn FnMut(&Notification) + Send>;

/// Handle returned by `add_listener`, used to deregister the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    kind: NotificationKind,
    callback: Listener,
}

/// Registered callbacks, keyed by notification kind.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Entry>,
    next_id: u64,
    removed: usize,
}

impl Listeners {
    pub fn add(&mut self, kind: NotificationKind, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind, callback });
        id
    }

    /// Removes a callback. Returns false if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let found = self.entries.len() != before;
        if found {
            self.removed += 1;
        }
        found
    }

    /// Invokes every callback registered for the notification's kind.
    pub fn dispatch(&mut self, notification: &Notification) {
        let kind = notification.kind();
        for entry in self.entries.iter_mut().filter(|e| e.kind == kind) {
            (entry.callback)(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful removals since creation.
    pub fn removal_count(&self) -> usize {
        self.removed
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("registered", &self.entries.len())
            .field("removed", &self.removed)
            .finish()
    }
}

/// Registry shared between a driver handle and its worker.
pub type SharedListeners = Arc<Mutex<Listeners>>;

/// Locks a mutex, recovering the data if a listener panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
