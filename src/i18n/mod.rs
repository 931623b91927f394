// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Localized strings come from Fluent `.ftl` files embedded in the binary.
//! The locale is picked from the CLI, then the config file, then the
//! system settings, and falls back to `en-US`.

pub mod fluent;
