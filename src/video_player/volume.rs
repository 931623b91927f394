// SPDX-License-Identifier: MPL-2.0
//! Volume domain types for playback.
//!
//! [`Volume`] is the clamped level forwarded to the driver. [`VolumeInput`]
//! keeps the raw value of the volume control, which is what the mute icon
//! rule looks at.

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, MUTE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// # Example
///
/// ```
/// use iced_reel::video_player::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < MUTE_THRESHOLD
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

/// Icon shown by the volume control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeIcon {
    #[default]
    High,
    Muted,
}

/// Decides when the volume control shows the muted icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MuteRule {
    /// Muted only when the raw control value is exactly `"0"`.
    #[default]
    Exact,
    /// Muted whenever the numeric level is below the audible threshold.
    Threshold,
}

impl MuteRule {
    /// Picks the icon for a raw control value.
    ///
    /// Returns `None` when the rule cannot decide (threshold rule on
    /// unparseable input); the caller keeps its current icon.
    #[must_use]
    pub fn icon_for(self, raw: &str, parsed: Option<Volume>) -> Option<VolumeIcon> {
        match self {
            MuteRule::Exact => Some(if raw == "0" {
                VolumeIcon::Muted
            } else {
                VolumeIcon::High
            }),
            MuteRule::Threshold => parsed.map(|volume| {
                if volume.is_muted() {
                    VolumeIcon::Muted
                } else {
                    VolumeIcon::High
                }
            }),
        }
    }
}

/// Raw value of the volume control.
///
/// The slider publishes its value as text; the text is kept as-is so the
/// exact mute rule can inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeInput {
    raw: String,
}

impl VolumeInput {
    #[must_use]
    pub fn new(volume: Volume) -> Self {
        Self {
            raw: volume.value().to_string(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Stores a new raw value and returns the level it parses to.
    pub fn set(&mut self, raw: String) -> Option<Volume> {
        self.raw = raw;
        self.parsed()
    }

    /// Level parsed from the raw value, `None` if it is not a finite number.
    #[must_use]
    pub fn parsed(&self) -> Option<Volume> {
        self.raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Volume::new)
    }

    /// Position of the slider thumb. Unparseable input parks it at zero.
    #[must_use]
    pub fn slider_value(&self) -> f32 {
        self.parsed().map_or(MIN_VOLUME, Volume::value)
    }
}

impl Default for VolumeInput {
    fn default() -> Self {
        Self::new(Volume::default())
    }
}
