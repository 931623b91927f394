// SPDX-License-Identifier: MPL-2.0
//! Playback speed domain type for video playback.
//!
//! The speed menu only offers a fixed set of presets, so the speed is an
//! enum rather than a clamped float.

use crate::config::PLAYBACK_SPEED_PRESETS;

/// One of the playback rates offered by the speed menu.
///
/// # Example
///
/// ```
/// use iced_reel::video_player::PlaybackSpeed;
///
/// assert_eq!(PlaybackSpeed::Double.value(), 2.0);
/// assert_eq!(PlaybackSpeed::nearest(1.4), PlaybackSpeed::OneAndHalf);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackSpeed {
    Double,
    OneAndHalf,
    #[default]
    Normal,
    ThreeQuarters,
    Half,
}

impl PlaybackSpeed {
    /// All presets, in the order the speed menu lists them.
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::Double,
        PlaybackSpeed::OneAndHalf,
        PlaybackSpeed::Normal,
        PlaybackSpeed::ThreeQuarters,
        PlaybackSpeed::Half,
    ];

    /// Returns the rate multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            PlaybackSpeed::Double => PLAYBACK_SPEED_PRESETS[0],
            PlaybackSpeed::OneAndHalf => PLAYBACK_SPEED_PRESETS[1],
            PlaybackSpeed::Normal => PLAYBACK_SPEED_PRESETS[2],
            PlaybackSpeed::ThreeQuarters => PLAYBACK_SPEED_PRESETS[3],
            PlaybackSpeed::Half => PLAYBACK_SPEED_PRESETS[4],
        }
    }

    /// Snaps an arbitrary rate to the closest preset.
    ///
    /// Non-finite input falls back to normal speed.
    #[must_use]
    pub fn nearest(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                let da = (a.value() - value).abs();
                let db = (b.value() - value).abs();
                da.total_cmp(&db)
            })
            .unwrap_or_default()
    }


    /// Localization key of the menu label.
    pub fn label_key(self) -> &'static str {
        match self {
            PlaybackSpeed::Double => "speed-double",
            PlaybackSpeed::OneAndHalf => "speed-one-and-half",
            PlaybackSpeed::Normal => "speed-normal",
            PlaybackSpeed::ThreeQuarters => "speed-three-quarters",
            PlaybackSpeed::Half => "speed-half",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_is_normal_speed() {
        assert_eq!(PlaybackSpeed::default(), PlaybackSpeed::Normal);
        assert_abs_diff_eq!(PlaybackSpeed::default().value(), 1.0);
    }

    #[test]
    fn menu_order_is_fastest_first() {
        let values: Vec<f64> = PlaybackSpeed::ALL.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![2.0, 1.5, 1.0, 0.75, 0.5]);
    }

    #[test]
    fn nearest_snaps_to_closest_preset() {
        assert_eq!(PlaybackSpeed::nearest(3.0), PlaybackSpeed::Double);
        assert_eq!(PlaybackSpeed::nearest(0.1), PlaybackSpeed::Half);
        assert_eq!(PlaybackSpeed::nearest(0.8), PlaybackSpeed::ThreeQuarters);
        assert_eq!(PlaybackSpeed::nearest(f64::NAN), PlaybackSpeed::Normal);
    }

    #[test]
    fn label_keys_are_distinct() {
        let mut keys: Vec<&str> = PlaybackSpeed::ALL.iter().map(|s| s.label_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PlaybackSpeed::ALL.len());
    }
}
