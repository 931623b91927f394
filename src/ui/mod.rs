// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`player`] - The video player widget
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`icons`] - SVG control icons

pub mod design_tokens;
pub mod icons;
pub mod player;
pub mod styles;
