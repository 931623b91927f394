// SPDX-License-Identifier: MPL-2.0
//! Clock-only playback driver.
//!
//! `MemoryDriver` keeps a media clock without decoding anything. Time only
//! moves when [`MemoryDriver::advance`] is called, which makes it suitable
//! for headless use and for exercising the player deterministically.
//! Clones share the same clock and listeners.

use super::driver::{Notification, NotificationKind, PlaybackDriver};
use super::listeners::{lock, Listener, ListenerId, Listeners, SharedListeners};
use super::playback_speed::PlaybackSpeed;
use super::volume::Volume;
use crate::error::DriverError;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Clock {
    paused: bool,
    current_time: f64,
    duration: f64,
    metadata_loaded: bool,
    volume: Volume,
    speed: PlaybackSpeed,
    reject_play: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration: 0.0,
            metadata_loaded: false,
            volume: Volume::default(),
            speed: PlaybackSpeed::default(),
            reject_play: false,
        }
    }
}

/// In-memory [`PlaybackDriver`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    clock: Arc<Mutex<Clock>>,
    listeners: SharedListeners,
}

impl MemoryDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the duration known and raises the metadata notification.
    pub fn load_metadata(&mut self, duration: f64) {
        let duration = duration.max(0.0);
        {
            let mut clock = lock(&self.clock);
            clock.duration = duration;
            clock.metadata_loaded = true;
        }
        self.emit(Notification::MetadataLoaded { duration });
    }

    /// Moves the clock forward by `elapsed` wall seconds if playing.
    ///
    /// The step is scaled by the playback rate. Reaching the end pauses the
    /// clock and raises a play-state notification.
    pub fn advance(&mut self, elapsed: f64) {
        let (position, ended) = {
            let mut clock = lock(&self.clock);
            if clock.paused {
                return;
            }
            let next = clock.current_time + elapsed.max(0.0) * clock.speed.value();
            let ended = clock.metadata_loaded && next >= clock.duration;
            clock.current_time = if clock.metadata_loaded {
                next.min(clock.duration)
            } else {
                next
            };
            if ended {
                clock.paused = true;
            }
            (clock.current_time, ended)
        };
        self.emit(Notification::TimeUpdate {
            current_time: position,
        });
        if ended {
            self.emit(Notification::PlayState { playing: false });
        }
    }

    /// Makes subsequent `play` calls fail, as a blocked autoplay would.
    pub fn set_play_rejected(&mut self, rejected: bool) {
        lock(&self.clock).reject_play = rejected;
    }

    pub fn volume(&self) -> Volume {
        lock(&self.clock).volume
    }

    pub fn playback_rate(&self) -> PlaybackSpeed {
        lock(&self.clock).speed
    }

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Number of successful `remove_listener` calls so far.
    pub fn removal_count(&self) -> usize {
        lock(&self.listeners).removal_count()
    }

    fn emit(&self, notification: Notification) {
        lock(&self.listeners).dispatch(&notification);
    }
}

impl PlaybackDriver for MemoryDriver {
    fn play(&mut self) -> Result<(), DriverError> {
        {
            let mut clock = lock(&self.clock);
            if clock.reject_play {
                return Err(DriverError::PlayRejected(
                    "playback blocked by policy".to_string(),
                ));
            }
            if !clock.paused {
                return Ok(());
            }
            if clock.metadata_loaded && clock.current_time >= clock.duration {
                clock.current_time = 0.0;
            }
            clock.paused = false;
        }
        self.emit(Notification::PlayState { playing: true });
        Ok(())
    }

    fn pause(&mut self) {
        {
            let mut clock = lock(&self.clock);
            if clock.paused {
                return;
            }
            clock.paused = true;
        }
        self.emit(Notification::PlayState { playing: false });
    }

    fn is_paused(&self) -> bool {
        lock(&self.clock).paused
    }

    fn current_time(&self) -> f64 {
        lock(&self.clock).current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        if !secs.is_finite() {
            log::warn!("Ignoring seek to non-finite position");
            return;
        }
        let position = {
            let mut clock = lock(&self.clock);
            let upper = if clock.metadata_loaded {
                clock.duration
            } else {
                f64::MAX
            };
            clock.current_time = secs.clamp(0.0, upper);
            clock.current_time
        };
        self.emit(Notification::TimeUpdate {
            current_time: position,
        });
    }

    fn duration(&self) -> f64 {
        lock(&self.clock).duration
    }

    fn set_volume(&mut self, volume: Volume) {
        lock(&self.clock).volume = volume;
    }

    fn set_playback_rate(&mut self, speed: PlaybackSpeed) {
        lock(&self.clock).speed = speed;
    }

    fn add_listener(&mut self, kind: NotificationKind, mut listener: Listener) -> ListenerId {
        let known_duration = {
            let clock = lock(&self.clock);
            clock.metadata_loaded.then_some(clock.duration)
        };
        if let (NotificationKind::MetadataLoaded, Some(duration)) = (kind, known_duration) {
            listener(&Notification::MetadataLoaded { duration });
        }
        lock(&self.listeners).add(kind, listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        lock(&self.listeners).remove(id)
    }
}
