// SPDX-License-Identifier: MPL-2.0
//! Rendering of the player: video surface above a control bar.

use super::timeline::TimelineBar;
use super::{Message, Player};
use crate::config::VOLUME_SLIDER_STEP;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing};
use crate::ui::{icons, styles};
use crate::video_player::{PlaybackDriver, PlaybackSpeed, VolumeIcon};
use iced::widget::svg::Svg;
use iced::widget::{
    button, canvas, column, container, row, slider, text, tooltip, Column, Space, Text,
};
use iced::{Element, Length};

/// View context for rendering the player.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

impl<D: PlaybackDriver> Player<D> {
    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        column![self.surface.view(), self.controls(ctx.i18n)]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn controls<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let state = &self.state;

        let (play_icon, play_tooltip) = if state.is_playing {
            (icons::bars_vertical(), "player-pause-tooltip")
        } else {
            (icons::triangle_right(), "player-play-tooltip")
        };
        let play_pause = control_button(
            play_icon,
            Message::TogglePlayback,
            i18n.tr(play_tooltip),
            false,
        );

        let step = self.settings.skip_step_secs.to_string();
        let skip_backward = control_button(
            icons::rewind(),
            Message::SkipBackward,
            i18n.tr_with_args("player-skip-backward-tooltip", &[("seconds", &step)]),
            false,
        );
        let skip_forward = control_button(
            icons::fast_forward(),
            Message::SkipForward,
            i18n.tr_with_args("player-skip-forward-tooltip", &[("seconds", &step)]),
            false,
        );

        let (volume_icon, volume_tooltip) = match state.volume_icon {
            VolumeIcon::High => (icons::speaker_waves(), "player-volume-tooltip"),
            VolumeIcon::Muted => (icons::speaker_crossed(), "player-muted-tooltip"),
        };
        let volume_indicator = tooltip(
            icons::tinted(icons::sized(volume_icon, sizing::ICON_SM), palette::WHITE),
            Text::new(i18n.tr(volume_tooltip)),
            tooltip::Position::Top,
        )
        .gap(4);

        let volume_slider = slider(0.0..=1.0, self.volume_input.slider_value(), |value: f32| {
            Message::VolumeChanged(value.to_string())
        })
        .step(VOLUME_SLIDER_STEP)
        .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH));

        let time_display = text(format!(
            "{} / {}",
            self.current_time_label(),
            self.duration_label()
        ))
        .size(sizing::ICON_SM);

        let speed = control_button(
            icons::gauge(),
            Message::ToggleSpeedMenu,
            i18n.tr("player-speed-tooltip"),
            state.speed_menu.is_visible(),
        );

        let (fullscreen_icon, fullscreen_tooltip) = if state.fullscreen {
            (icons::corners_in(), "player-exit-fullscreen-tooltip")
        } else {
            (icons::corners_out(), "player-fullscreen-tooltip")
        };
        let fullscreen = control_button(
            fullscreen_icon,
            Message::ToggleFullscreen,
            i18n.tr(fullscreen_tooltip),
            false,
        );

        let buttons = row![
            play_pause,
            skip_backward,
            skip_forward,
            volume_indicator,
            volume_slider,
            time_display,
            Space::new().width(Length::Fill),
            speed,
            fullscreen,
        ]
        .spacing(spacing::XS)
        .align_y(iced::Alignment::Center);

        let timeline = canvas::Canvas::new(TimelineBar {
            progress: state.progress(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(sizing::TIMELINE_HEIGHT));

        let mut bar = Column::new().spacing(spacing::XXS);
        if state.speed_menu.is_visible() {
            bar = bar.push(row![
                Space::new().width(Length::Fill),
                speed_menu(state.speed, i18n)
            ]);
        }
        bar = bar.push(timeline).push(buttons);

        container(bar)
            .width(Length::Fill)
            .padding(spacing::XS)
            .style(styles::container::controls_bar)
            .into()
    }
}

/// Popup listing the speed presets, fastest first, with the active one
/// highlighted.
fn speed_menu<'a>(active: PlaybackSpeed, i18n: &I18n) -> Element<'a, Message> {
    let items = PlaybackSpeed::ALL.into_iter().map(|speed| -> Element<'a, Message> {
        let item = button(text(i18n.tr(speed.label_key())).size(sizing::ICON_SM))
            .on_press(Message::SelectSpeed(speed))
            .width(Length::Fill)
            .padding(spacing::XXS);
        if speed == active {
            item.style(styles::button::selected).into()
        } else {
            item.style(button::text).into()
        }
    });

    container(Column::with_children(items).spacing(spacing::XXS))
        .width(Length::Fixed(sizing::SPEED_MENU_WIDTH))
        .padding(spacing::XXS)
        .style(styles::container::menu_panel)
        .into()
}

fn control_button<'a>(
    icon: Svg<'a>,
    message: Message,
    tooltip_text: String,
    active: bool,
) -> Element<'a, Message> {
    let base = button(icons::tinted(
        icons::sized(icon, sizing::ICON_SM),
        palette::WHITE,
    ))
    .on_press(message)
    .padding(spacing::XS)
    .height(Length::Fixed(sizing::BUTTON_HEIGHT));

    let content: Element<'a, Message> = if active {
        base.style(styles::button::selected).into()
    } else {
        base.style(styles::button::control).into()
    };

    tooltip(content, Text::new(tooltip_text), tooltip::Position::Top)
        .gap(4)
        .into()
}
