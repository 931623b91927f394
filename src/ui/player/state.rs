// SPDX-License-Identifier: MPL-2.0
//! UI state of the player widget.

use crate::video_player::{PlaybackSpeed, VolumeIcon};

/// Visibility of the speed menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMenu {
    #[default]
    Hidden,
    Visible,
}

impl SpeedMenu {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SpeedMenu::Hidden => SpeedMenu::Visible,
            SpeedMenu::Visible => SpeedMenu::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == SpeedMenu::Visible
    }
}

/// Everything the controls render.
///
/// `current_time` is not clamped against `duration`; it is whatever the
/// driver last reported.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    pub is_playing: bool,
    /// Playback position in seconds.
    pub current_time: f64,
    /// Media duration in seconds, 0 until metadata is loaded.
    pub duration: f64,
    pub speed_menu: SpeedMenu,
    pub speed: PlaybackSpeed,
    pub volume_icon: VolumeIcon,
    /// Mirror of the host window's fullscreen mode.
    pub fullscreen: bool,
}

impl PlayerState {
    /// Fraction of the timeline to fill, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn initial_state_is_paused_with_hidden_menu() {
        let state = PlayerState::default();
        assert!(!state.is_playing);
        assert_eq!(state.speed_menu, SpeedMenu::Hidden);
        assert_eq!(state.speed, PlaybackSpeed::Normal);
        assert_eq!(state.volume_icon, VolumeIcon::High);
        assert!(!state.fullscreen);
    }

    #[test]
    fn speed_menu_toggle_flips() {
        assert_eq!(SpeedMenu::Hidden.toggled(), SpeedMenu::Visible);
        assert_eq!(SpeedMenu::Visible.toggled(), SpeedMenu::Hidden);
        assert!(SpeedMenu::Visible.is_visible());
    }

    #[test]
    fn progress_handles_unknown_duration() {
        let state = PlayerState {
            current_time: 5.0,
            ..PlayerState::default()
        };
        assert_abs_diff_eq!(state.progress(), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let state = PlayerState {
            current_time: 30.0,
            duration: 20.0,
            ..PlayerState::default()
        };
        assert_abs_diff_eq!(state.progress(), 1.0);

        let half = PlayerState {
            current_time: 10.0,
            duration: 20.0,
            ..PlayerState::default()
        };
        assert_abs_diff_eq!(half.progress(), 0.5);
    }
}
