// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Letterbox behind the video picture.
pub fn video_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        ..Default::default()
    }
}

/// Translucent bar holding the playback controls.
pub fn controls_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::GRAY_900
        })),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Popup panel of the speed menu.
///
/// Derived from the theme background so it stays readable in light and dark
/// modes.
pub fn menu_panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        border: Border {
            radius: radius::MD.into(),
            width: 1.0,
            color: palette::GRAY_700,
        },
        ..Default::default()
    }
}

/// Text color of error messages.
pub fn error_text(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(palette::ERROR_500),
        ..Default::default()
    }
}
