// SPDX-License-Identifier: MPL-2.0
//! Control icons as embedded SVG.
//!
//! Each icon is a small 24x24 path rendered through Iced's SVG widget. The
//! handle is parsed once and cached in a `OnceLock`. Icons are drawn in a
//! single color chosen by [`tinted`], so the same source works on the dark
//! control bar and in light menus.
//!
//! Icons use visual names (`triangle_right`), not action names.

use iced::widget::svg::{self, Handle, Svg};
use iced::{Color, Length};
use std::sync::OnceLock;

/// Defines an icon function returning an [`Svg`] with a cached handle.
macro_rules! define_icon {
    ($name:ident, $path:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<'a>() -> Svg<'a> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            let handle = HANDLE.get_or_init(|| {
                Handle::from_memory(
                    concat!(
                        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="black" d=""#,
                        $path,
                        r#""/></svg>"#
                    )
                    .as_bytes(),
                )
            });
            Svg::new(handle.clone())
        }
    };
}

define_icon!(triangle_right, "M8 5v14l11-7z", "Play icon: triangle pointing right.");
define_icon!(
    bars_vertical,
    "M6 5h4v14H6zM14 5h4v14h-4z",
    "Pause icon: two vertical bars."
);
define_icon!(
    speaker_waves,
    "M3 9v6h4l5 5V4L7 9H3zm13.5 3A4.5 4.5 0 0 0 14 8v8a4.5 4.5 0 0 0 2.5-4zM14 3.2v2.1a7 7 0 0 1 0 13.4v2.1a9 9 0 0 0 0-17.6z",
    "Volume icon: speaker with sound waves."
);
define_icon!(
    speaker_crossed,
    "M3 9v6h4l5 5V4L7 9H3zm13.6 3 2.7-2.7-1.4-1.4-2.7 2.7-2.7-2.7-1.4 1.4 2.7 2.7-2.7 2.7 1.4 1.4 2.7-2.7 2.7 2.7 1.4-1.4z",
    "Muted icon: speaker with a cross."
);
define_icon!(
    rewind,
    "M11 18V6l-8.5 6 8.5 6zm.5-6 8.5 6V6l-8.5 6z",
    "Skip backward icon: double triangle pointing left."
);
define_icon!(
    fast_forward,
    "M4 18l8.5-6L4 6v12zm9-12v12l8.5-6L13 6z",
    "Skip forward icon: double triangle pointing right."
);
define_icon!(
    gauge,
    "M12 4a9 9 0 0 0-7.8 13.5h15.6A9 9 0 0 0 12 4zm4.2 5.2-3.4 4.6a1.5 1.5 0 1 1-1.6-1.6l4.6-3.4z",
    "Speed icon: gauge with needle."
);
define_icon!(
    corners_out,
    "M4 4h6v2H6v4H4zm10 0h6v6h-2V6h-4zM4 14h2v4h4v2H4zm14 0h2v6h-6v-2h4z",
    "Enter fullscreen icon: corners pointing outward."
);
define_icon!(
    corners_in,
    "M8 4h2v6H4V8h4zm6 0h2v4h4v2h-6zM4 14h6v6H8v-4H4zm10 0h6v2h-4v4h-2z",
    "Exit fullscreen icon: corners pointing inward."
);

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates an icon with specified dimensions.
pub fn sized<'a>(icon: Svg<'a>, size: f32) -> Svg<'a> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}

/// Draws the icon in a single color.
pub fn tinted<'a>(icon: Svg<'a>, color: Color) -> Svg<'a> {
    icon.style(move |_theme, _status| svg::Style { color: Some(color) })
}
