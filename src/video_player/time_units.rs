// SPDX-License-Identifier: MPL-2.0
//! Time conversions used by the player controls and the decoder.

/// Microseconds per second as f64 for calculations.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Formats a position in seconds as `MM:SS`, or `HH:MM:SS` from one hour on.
///
/// Negative input is treated as zero.
///
/// # Examples
///
/// ```
/// use iced_reel::video_player::time_units::format_time;
///
/// assert_eq!(format_time(65.0), "01:05");
/// assert_eq!(format_time(3661.0), "01:01:01");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Maps a click on the timeline to a media position.
///
/// `offset_x` is measured from the left edge of a timeline `width` pixels
/// wide. The result is not clamped; a timeline without width yields `None`.
///
/// ```
/// use iced_reel::video_player::time_units::seek_target;
///
/// assert_eq!(seek_target(100.0, 200.0, 120.0), Some(60.0));
/// assert_eq!(seek_target(10.0, 0.0, 120.0), None);
/// ```
pub fn seek_target(offset_x: f32, width: f32, duration: f64) -> Option<f64> {
    if width.is_nan() || width <= 0.0 || !offset_x.is_finite() {
        return None;
    }
    Some(f64::from(offset_x) / f64::from(width) * duration)
}

/// Converts PTS seconds to microseconds, the unit of FFmpeg's global time base.
#[inline]
pub fn pts_to_micros(pts_secs: f64) -> i64 {
    (pts_secs * MICROS_PER_SECOND) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn format_time_short_durations() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(5.0), "00:05");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(125.9), "02:05");
    }

    #[test]
    fn format_time_with_hours() {
        assert_eq!(format_time(3600.0), "01:00:00");
        assert_eq!(format_time(3661.0), "01:01:01");
        assert_eq!(format_time(36_000.0 + 59.0 * 60.0 + 59.0), "10:59:59");
    }

    #[test]
    fn format_time_clamps_negative_and_nan() {
        assert_eq!(format_time(-12.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
    }

    #[test]
    fn seek_target_is_proportional() {
        assert_eq!(seek_target(100.0, 200.0, 120.0), Some(60.0));
        assert_eq!(seek_target(0.0, 200.0, 120.0), Some(0.0));
        assert_abs_diff_eq!(
            seek_target(50.0, 400.0, 10.0).unwrap_or(-1.0),
            1.25,
            epsilon = 1e-9
        );
    }

    #[test]
    fn seek_target_does_not_clamp() {
        assert_eq!(seek_target(300.0, 200.0, 100.0), Some(150.0));
    }

    #[test]
    fn seek_target_without_width_is_none() {
        assert_eq!(seek_target(10.0, 0.0, 100.0), None);
        assert_eq!(seek_target(10.0, -5.0, 100.0), None);
        assert_eq!(seek_target(f32::NAN, 100.0, 100.0), None);
    }

    #[test]
    fn pts_to_micros_converts_correctly() {
        assert_eq!(pts_to_micros(1.0), 1_000_000);
        assert_eq!(pts_to_micros(0.5), 500_000);
        assert_eq!(pts_to_micros(1.234567), 1_234_567);
    }
}
