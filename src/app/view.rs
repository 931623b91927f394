// SPDX-License-Identifier: MPL-2.0
//! Root view: the mounted player, or a placeholder when nothing is open.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::player::{self, Player};
use crate::ui::styles;
use crate::video_player::PlaybackDriver;
use iced::widget::{column, container, text, Column};
use iced::{Alignment, Element, Length};

/// Everything the root view reads.
pub struct ViewContext<'a, D: PlaybackDriver> {
    pub i18n: &'a I18n,
    pub player: Option<&'a Player<D>>,
    /// Localized reason the video could not be opened.
    pub load_error: Option<&'a str>,
}

pub fn view<'a, D: PlaybackDriver>(ctx: ViewContext<'a, D>) -> Element<'a, Message> {
    match ctx.player {
        Some(player) => player
            .view(player::ViewContext { i18n: ctx.i18n })
            .map(Message::Player),
        None => empty_state(ctx.i18n, ctx.load_error),
    }
}

fn empty_state<'a>(i18n: &I18n, load_error: Option<&'a str>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(spacing::SM)
        .align_x(Alignment::Center)
        .push(text(i18n.tr("empty-state-title")).size(sizing::ICON_MD));

    content = match load_error {
        Some(error) => content.push(
            container(text(error.to_string())).style(styles::container::error_text),
        ),
        None => content.push(text(i18n.tr("empty-state-hint"))),
    };

    container(column![content])
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::video_player::MemoryDriver;

    #[test]
    fn empty_state_builds_with_and_without_error() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());

        let _ = view::<MemoryDriver>(ViewContext {
            i18n: &i18n,
            player: None,
            load_error: None,
        });
        let _ = view::<MemoryDriver>(ViewContext {
            i18n: &i18n,
            player: None,
            load_error: Some("Could not open video"),
        });
    }
}
