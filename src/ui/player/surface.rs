// SPDX-License-Identifier: MPL-2.0
//! Widget showing the latest decoded video frame.

use crate::ui::styles;
use crate::video_player::VideoFrame;
use iced::widget::{container, image, Space};
use iced::{ContentFit, Element, Length};
use std::sync::Arc;

/// Image handle of the frame on screen.
///
/// A new handle is only built when the presentation timestamp changes, so
/// repeated renders reuse the uploaded texture.
#[derive(Debug, Default)]
pub struct Surface {
    handle: Option<image::Handle>,
    pts_secs: Option<f64>,
}

impl Surface {
    /// Replaces the picture if `frame` is newer than the one shown.
    ///
    /// Returns true when the picture changed.
    pub fn refresh(&mut self, frame: Option<VideoFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        if self.pts_secs == Some(frame.pts_secs) && self.handle.is_some() {
            return false;
        }

        let data = Arc::try_unwrap(frame.rgba).unwrap_or_else(|arc| (*arc).clone());
        self.handle = Some(image::Handle::from_rgba(frame.width, frame.height, data));
        self.pts_secs = Some(frame.pts_secs);
        true
    }

    #[cfg(test)]
    pub(crate) fn has_frame(&self) -> bool {
        self.handle.is_some()
    }

    /// Letterboxed picture filling the available space.
    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        let content: Element<'a, Message> = match &self.handle {
            Some(handle) => image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(styles::container::video_backdrop)
            .into()
    }
}
