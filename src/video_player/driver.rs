// SPDX-License-Identifier: MPL-2.0
//! The playback primitive the player widget drives.
//!
//! A [`PlaybackDriver`] owns the media clock. The widget issues commands
//! (play, pause, seek, volume, rate) and learns about progress through
//! listeners registered per [`NotificationKind`].
//!
//! Listeners run on whatever thread the driver raises notifications from,
//! so they must be `Send` and should only forward the notification.

use super::listeners::{Listener, ListenerId};
use super::playback_speed::PlaybackSpeed;
use super::volume::Volume;
use crate::error::DriverError;
use std::sync::Arc;

/// Kinds of notification a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    TimeUpdate,
    MetadataLoaded,
    PlayState,
}

/// A notification raised by a driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// The playback position moved.
    TimeUpdate { current_time: f64 },
    /// The media duration became known.
    MetadataLoaded { duration: f64 },
    /// Playback started or stopped, including at end of stream.
    PlayState { playing: bool },
}

impl Notification {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::TimeUpdate { .. } => NotificationKind::TimeUpdate,
            Notification::MetadataLoaded { .. } => NotificationKind::MetadataLoaded,
            Notification::PlayState { .. } => NotificationKind::PlayState,
        }
    }
}

/// A decoded picture ready for display.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands and queries the player needs from a media element.
///
/// Commands are fire-and-forget: they return once the request is queued,
/// not once the media reflects it. Only `play` reports a rejection the
/// caller is expected to handle.
pub trait PlaybackDriver {
    /// Starts or resumes playback.
    fn play(&mut self) -> Result<(), DriverError>;

    fn pause(&mut self);

    /// True when the media is not playing.
    fn is_paused(&self) -> bool;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to `secs`. Out-of-range targets are clamped by the driver.
    fn set_current_time(&mut self, secs: f64);

    /// Media duration in seconds, 0 until metadata is loaded.
    fn duration(&self) -> f64;

    fn set_volume(&mut self, volume: Volume);

    fn set_playback_rate(&mut self, speed: PlaybackSpeed);

    /// Registers a callback for notifications of `kind`.
    ///
    /// A metadata listener registered after the metadata is known is
    /// invoked once right away with the known duration.
    fn add_listener(&mut self, kind: NotificationKind, listener: Listener) -> ListenerId;

    /// Deregisters a callback. Returns false if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Latest decoded frame, for drivers that produce pictures.
    fn current_frame(&self) -> Option<VideoFrame> {
        None
    }
}
