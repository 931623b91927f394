// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Driver Error: {0}")]
    Driver(#[from] DriverError),
}

/// Failures reported by a playback driver.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverError {
    /// The media file could not be opened.
    #[error("Failed to open media: {0}")]
    Open(String),

    /// File exists but contains no video stream.
    #[error("No video stream found")]
    NoVideoStream,

    /// Decoding failed during playback.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// The underlying seek failed.
    #[error("Seek failed: {0}")]
    Seek(String),

    /// The driver refused to start playback (media not ready, playback policy).
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// The driver's worker has terminated and no longer accepts commands.
    #[error("Playback driver is not running")]
    NotRunning,
}

impl DriverError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DriverError::Open(_) => "error-open-media",
            DriverError::NoVideoStream => "error-no-video-stream",
            DriverError::Decode(_) => "error-decoding-failed",
            DriverError::Seek(_) => "error-seek-failed",
            DriverError::PlayRejected(_) => "error-play-rejected",
            DriverError::NotRunning => "error-driver-stopped",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
