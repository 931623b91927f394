// SPDX-License-Identifier: MPL-2.0
//! Scoped registration of the player's driver listeners.
//!
//! [`EventBinder::attach`] registers one listener per notification kind and
//! forwards what they receive into a channel. The registrations are
//! released exactly once, by [`EventBinder::detach`] or on drop.

use super::driver::{Notification, NotificationKind, PlaybackDriver};
use super::listeners::{Listener, ListenerId};
use tokio::sync::mpsc::UnboundedSender;

/// Driver notifications as seen by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundEvent {
    TimeUpdate(f64),
    MetadataLoaded(f64),
    PlayStateChanged(bool),
}

impl From<Notification> for BoundEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::TimeUpdate { current_time } => BoundEvent::TimeUpdate(current_time),
            Notification::MetadataLoaded { duration } => BoundEvent::MetadataLoaded(duration),
            Notification::PlayState { playing } => BoundEvent::PlayStateChanged(playing),
        }
    }
}

const BOUND_KINDS: [NotificationKind; 3] = [
    NotificationKind::TimeUpdate,
    NotificationKind::MetadataLoaded,
    NotificationKind::PlayState,
];

/// Listener registrations held on a driver for the lifetime of the binder.
#[derive(Debug)]
pub struct EventBinder<D: PlaybackDriver> {
    driver: D,
    ids: Vec<ListenerId>,
}

impl<D: PlaybackDriver> EventBinder<D> {
    /// Registers the time-update, metadata-loaded and play-state listeners.
    pub fn attach(mut driver: D, sink: UnboundedSender<BoundEvent>) -> Self {
        let ids = BOUND_KINDS
            .into_iter()
            .map(|kind| driver.add_listener(kind, forward_to(sink.clone())))
            .collect();
        log::debug!("Attached player listeners");
        Self { driver, ids }
    }

    /// Number of registrations still held.
    pub fn bound_count(&self) -> usize {
        self.ids.len()
    }

    /// Releases the registrations now.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        for id in self.ids.drain(..) {
            if !self.driver.remove_listener(id) {
                log::warn!("Player listener {:?} was already removed", id);
            }
        }
        log::debug!("Detached player listeners");
    }
}

impl<D: PlaybackDriver> Drop for EventBinder<D> {
    fn drop(&mut self) {
        self.release();
    }
}

fn forward_to(sink: UnboundedSender<BoundEvent>) -> Listener {
    Box::new(move |notification| {
        // The receiver is gone once the subscription stops; nothing to do then.
        let _ = sink.send(BoundEvent::from(*notification));
    })
}
