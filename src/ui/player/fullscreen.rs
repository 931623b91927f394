// SPDX-License-Identifier: MPL-2.0
//! Fullscreen query consulted by the player.

/// The window (or any surface) hosting the player.
///
/// The player never switches modes itself. It asks the host whether
/// fullscreen is active and returns an effect the host applies.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
}
