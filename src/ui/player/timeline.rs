// SPDX-License-Identifier: MPL-2.0
//! Clickable progress bar.

use super::Message;
use crate::ui::design_tokens::{palette, sizing};
use iced::widget::canvas;
use iced::{mouse, Point, Size};

/// Canvas program drawing the progress track and reporting clicks.
///
/// Clicks are reported as an offset from the left edge of the bar together
/// with the bar width, so the player maps them to a time on its own.
#[derive(Debug, Clone, Copy)]
pub struct TimelineBar {
    /// Filled fraction, in [0, 1].
    pub progress: f32,
}

impl canvas::Program<Message> for TimelineBar {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: iced::Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        if let iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                return Some(
                    Action::publish(Message::TimelineClicked {
                        offset_x: position.x,
                        width: bounds.width,
                    })
                    .and_capture(),
                );
            }
        }
        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let track_y = (bounds.height - sizing::TIMELINE_TRACK) / 2.0;
        frame.fill_rectangle(
            Point::new(0.0, track_y),
            Size::new(bounds.width, sizing::TIMELINE_TRACK),
            palette::GRAY_400,
        );

        let filled = bounds.width * self.progress.clamp(0.0, 1.0);
        if filled > 0.0 {
            frame.fill_rectangle(
                Point::new(0.0, track_y),
                Size::new(filled, sizing::TIMELINE_TRACK),
                palette::PRIMARY_500,
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: iced::Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
