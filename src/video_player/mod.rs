// SPDX-License-Identifier: MPL-2.0
//! Playback drivers and the plumbing between a driver and the player widget.
//!
//! [`PlaybackDriver`] is the media element the player controls. Two drivers
//! are provided: [`FfmpegDriver`] decodes a file on its own thread, and
//! [`MemoryDriver`] keeps a clock without decoding.

pub mod binder;
pub mod driver;
pub mod ffmpeg_driver;
pub mod listeners;
pub mod memory_driver;
mod playback_speed;
pub mod subscription;
pub mod time_units;
mod volume;

pub use binder::{BoundEvent, EventBinder};
pub use driver::{Notification, NotificationKind, PlaybackDriver, VideoFrame};
pub use ffmpeg_driver::FfmpegDriver;
pub use listeners::{Listener, ListenerId};
pub use memory_driver::MemoryDriver;
pub use playback_speed::PlaybackSpeed;
pub use subscription::driver_events;
pub use time_units::{format_time, seek_target};
pub use volume::{MuteRule, Volume, VolumeIcon, VolumeInput};
