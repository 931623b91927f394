// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` loads the configuration, opens the video given on the command
//! line and mounts a [`Player`] over it. It also owns the window mode, so it
//! answers the player's fullscreen queries and carries out the resulting
//! [`Effect`]s. On a close request the player is unmounted and its last
//! volume and speed are written back to `settings.toml`.

mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::player::{self, Effect, FullscreenHost, Player, PlayerSettings};
use crate::video_player::{FfmpegDriver, PlaybackDriver};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Session id given to the player mounted at startup.
const STARTUP_SESSION: u64 = 1;

/// Window id and mode as last reported by the window.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowMode {
    id: Option<window::Id>,
    fullscreen: bool,
}

impl FullscreenHost for WindowMode {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl WindowMode {
    /// Asks the window to switch mode. Does nothing until the window id is
    /// known or when the window is already in the requested mode.
    ///
    /// The recorded mode only changes once the window reports back.
    fn set_fullscreen(&self, desired: bool) -> Task<Message> {
        if self.fullscreen == desired {
            return Task::none();
        }
        let Some(id) = self.id else {
            log::debug!("Ignoring fullscreen request before the window opened");
            return Task::none();
        };

        let mode = if desired {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };
        window::set_mode(id, mode).chain(query_mode(id))
    }

    /// Records a reported mode. Returns true if fullscreen changed.
    fn observe(&mut self, mode: window::Mode) -> bool {
        let fullscreen = mode == window::Mode::Fullscreen;
        let changed = self.fullscreen != fullscreen;
        self.fullscreen = fullscreen;
        changed
    }
}

fn query_mode(id: window::Id) -> Task<Message> {
    window::mode(id).map(Message::WindowModeObserved)
}

/// Root Iced application state.
pub struct App<D: PlaybackDriver = FfmpegDriver> {
    pub i18n: I18n,
    config: Config,
    /// Directory given with `--config-dir`, if any.
    config_dir: Option<PathBuf>,
    /// False when `settings.toml` could not be read; it is then left as is.
    save_settings: bool,
    player: Option<Player<D>>,
    /// Localized reason the startup video could not be opened.
    load_error: Option<String>,
    window: WindowMode,
}

impl<D: PlaybackDriver> fmt::Debug for App<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_player", &self.player.is_some())
            .field("load_error", &self.load_error)
            .field("window", &self.window)
            .finish()
    }
}

/// The application as launched from the command line.
type DesktopApp = App<FfmpegDriver>;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        exit_on_close_request: false,
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        DesktopApp::new(flags)
    };

    iced::application(boot, DesktopApp::update, DesktopApp::view)
        .title(DesktopApp::title)
        .theme(DesktopApp::theme)
        .window(window_settings())
        .subscription(DesktopApp::subscription)
        .run()
}

impl App<FfmpegDriver> {
    /// Loads the configuration and opens the video named in `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang, &config);
        if let Some(key) = &warning {
            log::warn!("{}", i18n.tr(key));
        }

        let mut app = match flags.file_path {
            Some(path) => match FfmpegDriver::open(&path) {
                Ok(driver) => Self::with_driver(i18n, config, driver),
                Err(e) => {
                    log::error!("Failed to open {}: {}", path, e);
                    let detail = e.to_string();
                    let load_error = i18n.tr_with_args(e.i18n_key(), &[("detail", &detail)]);
                    Self {
                        config,
                        load_error: Some(load_error),
                        ..Self::empty(i18n)
                    }
                }
            },
            None => Self {
                config,
                ..Self::empty(i18n)
            },
        };
        app.config_dir = config_dir;
        app.save_settings = warning.is_none();
        (app, Task::none())
    }
}

impl<D: PlaybackDriver> App<D> {
    /// App without a video.
    pub fn empty(i18n: I18n) -> Self {
        Self {
            i18n,
            config: Config::default(),
            config_dir: None,
            save_settings: true,
            player: None,
            load_error: None,
            window: WindowMode::default(),
        }
    }

    /// App with a player mounted over `driver`.
    pub fn with_driver(i18n: I18n, config: Config, driver: D) -> Self {
        let settings = PlayerSettings::from_config(&config.video);
        Self {
            config,
            player: Some(Player::mount(driver, settings, STARTUP_SESSION)),
            ..Self::empty(i18n)
        }
    }

    pub fn player(&self) -> Option<&Player<D>> {
        self.player.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.window.fullscreen
    }

    /// Unmounts the player, handing back its driver. The player's volume
    /// and speed are kept in the configuration.
    pub fn close(&mut self) -> Option<D> {
        let player = self.player.take()?;
        if let Some(volume) = player.volume_input().parsed() {
            self.config.video.volume = Some(volume.value());
        }
        self.config.video.speed = Some(player.state().speed.value());
        Some(player.unmount())
    }

    fn save_config(&self) {
        if !self.save_settings {
            log::debug!("Leaving unreadable settings file untouched");
            return;
        }
        if let Err(e) = config::save_with_override(&self.config, self.config_dir.clone()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Player(message) => {
                let Some(player) = self.player.as_mut() else {
                    return Task::none();
                };
                match player.update(message, &self.window) {
                    Effect::None => Task::none(),
                    Effect::EnterFullscreen => self.window.set_fullscreen(true),
                    Effect::ExitFullscreen => self.window.set_fullscreen(false),
                }
            }
            Message::WindowSeen(id) => {
                self.window.id = Some(id);
                // Resizes also follow fullscreen changes made by the window
                // manager.
                query_mode(id)
            }
            Message::WindowModeObserved(mode) => {
                if self.window.observe(mode) {
                    let fullscreen = self.window.fullscreen;
                    if let Some(player) = self.player.as_mut() {
                        player.update(player::Message::FullscreenChanged(fullscreen), &self.window);
                    }
                }
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                log::debug!("Close requested for window {:?}", id);
                if self.close().is_some() {
                    self.save_config();
                }
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            player: self.player.as_ref(),
            load_error: self.load_error.as_deref(),
        })
    }
}

impl<D> App<D>
where
    D: PlaybackDriver + Clone + Send + 'static,
{
    pub fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        match &self.player {
            Some(player) => Subscription::batch([
                event_sub,
                player.subscription().map(Message::Player),
            ]),
            None => event_sub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::video_player::{BoundEvent, MemoryDriver, PlaybackSpeed};
    use tempfile::TempDir;

    fn app_with_memory_driver() -> (App<MemoryDriver>, MemoryDriver) {
        let driver = MemoryDriver::new();
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let app = App::with_driver(i18n, Config::default(), driver.clone());
        (app, driver)
    }

    /// App whose settings are written under a temporary directory.
    fn app_saving_to(dir: &TempDir) -> (App<MemoryDriver>, MemoryDriver) {
        let (mut app, driver) = app_with_memory_driver();
        app.config_dir = Some(dir.path().to_path_buf());
        (app, driver)
    }

    #[test]
    fn player_messages_reach_the_driver() {
        let (mut app, driver) = app_with_memory_driver();

        let _ = app.update(Message::Player(player::Message::TogglePlayback));

        assert!(!driver.is_paused());
        assert!(app.player().is_some_and(|p| p.state().is_playing));
    }

    #[test]
    fn fullscreen_waits_for_window_id() {
        let (mut app, _driver) = app_with_memory_driver();

        let _ = app.update(Message::Player(player::Message::ToggleFullscreen));

        assert!(!app.is_fullscreen());
    }

    #[test]
    fn fullscreen_waits_for_window_to_report_mode() {
        let (mut app, _driver) = app_with_memory_driver();
        let _ = app.update(Message::WindowSeen(window::Id::unique()));

        let _ = app.update(Message::Player(player::Message::ToggleFullscreen));
        assert!(!app.is_fullscreen());

        let _ = app.update(Message::WindowModeObserved(window::Mode::Fullscreen));
        assert!(app.is_fullscreen());
        assert!(app.player().is_some_and(|p| p.state().fullscreen));
    }

    #[test]
    fn mode_reported_by_window_manager_is_mirrored() {
        let (mut app, _driver) = app_with_memory_driver();
        let _ = app.update(Message::WindowSeen(window::Id::unique()));
        let _ = app.update(Message::WindowModeObserved(window::Mode::Fullscreen));

        // Left fullscreen without going through the player.
        let _ = app.update(Message::WindowModeObserved(window::Mode::Windowed));

        assert!(!app.is_fullscreen());
        assert!(app.player().is_some_and(|p| !p.state().fullscreen));
    }

    #[test]
    fn messages_without_player_are_ignored() {
        let mut app: App<MemoryDriver> = App::empty(I18n::default());

        let _ = app.update(Message::Player(player::Message::Driver(
            BoundEvent::TimeUpdate(3.0),
        )));

        assert!(app.player().is_none());
        assert!(app.load_error().is_none());
    }

    #[test]
    fn close_unmounts_and_pauses() {
        let (mut app, _driver) = app_with_memory_driver();
        let _ = app.update(Message::Player(player::Message::TogglePlayback));

        let driver = app.close();

        assert!(driver.is_some_and(|d| d.is_paused()));
        assert!(app.player().is_none());
    }

    #[test]
    fn close_request_saves_volume_and_speed() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let (mut app, driver) = app_saving_to(&dir);
        let _ = app.update(Message::Player(player::Message::TogglePlayback));
        let _ = app.update(Message::Player(player::Message::VolumeChanged(
            "0.25".to_string(),
        )));
        let _ = app.update(Message::Player(player::Message::SelectSpeed(
            PlaybackSpeed::ThreeQuarters,
        )));

        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        assert!(app.player().is_none());
        assert!(driver.is_paused());
        let saved = config::load_from_path(&dir.path().join("settings.toml"))
            .expect("settings should be written");
        assert_abs_diff_eq!(saved.video.volume.unwrap_or_default(), 0.25);
        assert_abs_diff_eq!(saved.video.speed.unwrap_or_default(), 0.75);
    }

    #[test]
    fn unparseable_volume_is_not_saved() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let (mut app, _driver) = app_saving_to(&dir);
        let _ = app.update(Message::Player(player::Message::VolumeChanged(
            "0.5".to_string(),
        )));
        let _ = app.update(Message::Player(player::Message::VolumeChanged(
            "loud".to_string(),
        )));

        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        let saved = config::load_from_path(&dir.path().join("settings.toml"))
            .expect("settings should be written");
        assert_abs_diff_eq!(saved.video.volume.unwrap_or_default(), 1.0);
    }

    #[test]
    fn unreadable_settings_are_not_overwritten() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "not = [valid").expect("failed to write file");
        let (mut app, _driver) = app_saving_to(&dir);
        app.save_settings = false;

        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        assert!(app.player().is_none());
        let content = std::fs::read_to_string(&path).expect("failed to read file");
        assert_eq!(content, "not = [valid");
    }

    #[test]
    fn close_request_without_player_writes_nothing() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut app: App<MemoryDriver> = App::empty(I18n::default());
        app.config_dir = Some(dir.path().to_path_buf());

        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        assert!(!dir.path().join("settings.toml").exists());
    }

    #[test]
    fn title_is_localized() {
        let (app, _driver) = app_with_memory_driver();
        assert_eq!(app.title(), "IcedReel");
    }
}
