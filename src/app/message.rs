// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::player;
use iced::window;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Player(player::Message),
    /// A window event revealed the id of the main window.
    WindowSeen(window::Id),
    /// Mode the window reported after a mode change or a resize.
    WindowModeObserved(window::Mode),
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`).
    pub lang: Option<String>,
    /// Video to open on startup.
    pub file_path: Option<String>,
    /// Optional config directory override.
    pub config_dir: Option<String>,
}
