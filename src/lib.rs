// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` is a minimal video player widget built with the Iced GUI
//! framework.
//!
//! The [`ui::player::Player`] widget drives any [`video_player::PlaybackDriver`];
//! the bundled [`video_player::FfmpegDriver`] decodes files with FFmpeg and
//! [`video_player::MemoryDriver`] keeps a plain clock for tests.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub mod test_utils;
