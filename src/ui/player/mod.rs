// SPDX-License-Identifier: MPL-2.0
//! Video player widget.
//!
//! The player owns a [`PlaybackDriver`] and a [`PlayerState`]. User input
//! arrives as [`Message`]s; [`Player::update`] turns them into driver
//! commands and state changes. Driver notifications come back through
//! [`Player::subscription`] as [`Message::Driver`].
//!
//! Fullscreen is owned by the host window: the player consults a
//! [`FullscreenHost`] and returns an [`Effect`] asking the host to switch.

mod fullscreen;
pub mod state;
mod surface;
mod timeline;
mod view;

pub use fullscreen::FullscreenHost;
pub use state::{PlayerState, SpeedMenu};
pub use view::ViewContext;

use crate::config::{VideoConfig, MAX_SKIP_STEP_SECS, MIN_SKIP_STEP_SECS};
use crate::video_player::{
    driver_events, format_time, seek_target, BoundEvent, MuteRule, PlaybackDriver, PlaybackSpeed,
    Volume, VolumeInput,
};
use surface::Surface;

/// Messages handled by the player.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlayback,
    /// Click on the timeline, `offset_x` pixels from its left edge.
    TimelineClicked { offset_x: f32, width: f32 },
    /// New raw value of the volume control.
    VolumeChanged(String),
    SelectSpeed(PlaybackSpeed),
    ToggleSpeedMenu,
    ToggleFullscreen,
    /// The host entered or left fullscreen.
    FullscreenChanged(bool),
    SkipBackward,
    SkipForward,
    /// Notification forwarded from the driver.
    Driver(BoundEvent),
}

/// Requests the host has to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    EnterFullscreen,
    ExitFullscreen,
}

/// Settings applied when the player is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub volume: Volume,
    pub speed: PlaybackSpeed,
    pub skip_step_secs: f64,
    pub mute_rule: MuteRule,
    pub autoplay: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self::from_config(&VideoConfig::default())
    }
}

impl PlayerSettings {
    pub fn from_config(config: &VideoConfig) -> Self {
        let volume = config
            .volume
            .map_or_else(Volume::default, Volume::new);
        let speed = config
            .speed
            .map_or_else(PlaybackSpeed::default, PlaybackSpeed::nearest);
        let skip_step_secs = config
            .skip_step_secs
            .filter(|s| s.is_finite())
            .unwrap_or(crate::config::DEFAULT_SKIP_STEP_SECS)
            .clamp(MIN_SKIP_STEP_SECS, MAX_SKIP_STEP_SECS);

        Self {
            volume,
            speed,
            skip_step_secs,
            mute_rule: config.mute_rule,
            autoplay: config.autoplay.unwrap_or(false),
        }
    }
}

/// The mounted video player.
#[derive(Debug)]
pub struct Player<D: PlaybackDriver> {
    driver: D,
    state: PlayerState,
    volume_input: VolumeInput,
    settings: PlayerSettings,
    surface: Surface,
    session_id: u64,
    autoplay_done: bool,
}

impl<D: PlaybackDriver> Player<D> {
    /// Takes ownership of `driver` and applies the initial volume and speed.
    ///
    /// `session_id` identifies the driver subscription; give each mounted
    /// player a fresh one.
    pub fn mount(mut driver: D, settings: PlayerSettings, session_id: u64) -> Self {
        driver.set_volume(settings.volume);
        driver.set_playback_rate(settings.speed);

        let volume_input = VolumeInput::new(settings.volume);
        let volume_icon = settings
            .mute_rule
            .icon_for(volume_input.raw(), volume_input.parsed())
            .unwrap_or_default();

        let state = PlayerState {
            speed: settings.speed,
            volume_icon,
            ..PlayerState::default()
        };

        log::debug!("Player session {} mounted", session_id);

        Self {
            driver,
            state,
            volume_input,
            settings,
            surface: Surface::default(),
            session_id,
            autoplay_done: false,
        }
    }

    /// Stops playback and hands the driver back.
    ///
    /// The listeners are released when the subscription stops being
    /// returned from the application's `subscription`.
    /// `pause` is sent unconditionally: a threaded driver may still report
    /// paused while a queued play is pending.
    pub fn unmount(mut self) -> D {
        self.driver.pause();
        log::debug!("Player session {} unmounted", self.session_id);
        self.driver
    }

    pub fn update(&mut self, message: Message, host: &dyn FullscreenHost) -> Effect {
        match message {
            Message::TogglePlayback => {
                self.state.is_playing = !self.state.is_playing;
                if self.state.is_playing {
                    self.play();
                } else {
                    self.driver.pause();
                }
            }
            Message::TimelineClicked { offset_x, width } => {
                if let Some(target) = seek_target(offset_x, width, self.state.duration) {
                    self.driver.set_current_time(target);
                }
            }
            Message::VolumeChanged(raw) => self.change_volume(raw),
            Message::SelectSpeed(speed) => {
                self.driver.set_playback_rate(speed);
                self.state.speed = speed;
                self.state.speed_menu = SpeedMenu::Hidden;
            }
            Message::ToggleSpeedMenu => {
                self.state.speed_menu = self.state.speed_menu.toggled();
            }
            Message::ToggleFullscreen => {
                return if host.is_fullscreen() {
                    Effect::ExitFullscreen
                } else {
                    Effect::EnterFullscreen
                };
            }
            Message::FullscreenChanged(fullscreen) => {
                self.state.fullscreen = fullscreen;
            }
            Message::SkipBackward => self.skip(-self.settings.skip_step_secs),
            Message::SkipForward => self.skip(self.settings.skip_step_secs),
            Message::Driver(event) => self.on_driver_event(event),
        }
        Effect::None
    }

    fn play(&mut self) {
        if let Err(e) = self.driver.play() {
            log::warn!("Play rejected: {}", e);
            self.state.is_playing = !self.driver.is_paused();
        }
    }

    fn change_volume(&mut self, raw: String) {
        let parsed = self.volume_input.set(raw);
        match parsed {
            Some(volume) => self.driver.set_volume(volume),
            None => log::warn!("Ignoring volume value {:?}", self.volume_input.raw()),
        }
        if let Some(icon) = self
            .settings
            .mute_rule
            .icon_for(self.volume_input.raw(), parsed)
        {
            self.state.volume_icon = icon;
        }
    }

    fn skip(&mut self, delta_secs: f64) {
        let target = (self.driver.current_time() + delta_secs).max(0.0);
        self.driver.set_current_time(target);
    }

    fn on_driver_event(&mut self, event: BoundEvent) {
        // The first picture is decoded before any time update arrives.
        self.surface.refresh(self.driver.current_frame());
        match event {
            BoundEvent::TimeUpdate(current_time) => {
                self.state.current_time = current_time;
            }
            BoundEvent::MetadataLoaded(duration) => {
                self.state.duration = duration;
                if self.settings.autoplay && !self.autoplay_done {
                    self.autoplay_done = true;
                    self.state.is_playing = true;
                    self.play();
                }
            }
            BoundEvent::PlayStateChanged(playing) => {
                self.state.is_playing = playing;
            }
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn volume_input(&self) -> &VolumeInput {
        &self.volume_input
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Formatted playback position.
    pub fn current_time_label(&self) -> String {
        format_time(self.state.current_time)
    }

    /// Formatted media duration.
    pub fn duration_label(&self) -> String {
        format_time(self.state.duration)
    }
}

impl<D> Player<D>
where
    D: PlaybackDriver + Clone + Send + 'static,
{
    /// Driver notifications for this session.
    pub fn subscription(&self) -> iced::Subscription<Message> {
        driver_events(self.driver.clone(), self.session_id).map(Message::Driver)
    }
}
