// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the player controls.

pub mod button;
pub mod container;
