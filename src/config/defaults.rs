// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Audio volume bounds and the mute threshold
//! - **Playback Speed**: The fixed speed presets offered by the speed menu
//! - **Skip Step**: Relative seek performed by the skip buttons

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0). Media elements start at full volume.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Below this value the threshold mute rule shows the muted icon.
pub const MUTE_THRESHOLD: f32 = 0.001;

/// Step of the volume slider.
pub const VOLUME_SLIDER_STEP: f32 = 0.01;

// ==========================================================================
// Playback Speed Defaults
// ==========================================================================

/// Default playback speed (1.0 = normal speed).
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// Speed presets in the order the speed menu lists them.
pub const PLAYBACK_SPEED_PRESETS: [f64; 5] = [2.0, 1.5, 1.0, 0.75, 0.5];

// ==========================================================================
// Skip Step Defaults
// ==========================================================================

/// Default skip step in seconds.
pub const DEFAULT_SKIP_STEP_SECS: f64 = 5.0;

/// Minimum skip step in seconds.
pub const MIN_SKIP_STEP_SECS: f64 = 0.5;

/// Maximum skip step in seconds.
pub const MAX_SKIP_STEP_SECS: f64 = 30.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VOLUME <= DEFAULT_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(MUTE_THRESHOLD > MIN_VOLUME);
    assert!(MIN_SKIP_STEP_SECS <= DEFAULT_SKIP_STEP_SECS);
    assert!(DEFAULT_SKIP_STEP_SECS <= MAX_SKIP_STEP_SECS);
};
