//! Bar style configuration types.
//!
//! These settings are shared by every bar: one bar is created per display
//! and all of them read the same style on every layout and draw pass.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// Edge of the display the bar is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BarPlacement {
    /// Anchored to the top edge, below the menu bar when it is visible.
    #[default]
    Top,
    /// Anchored to the bottom edge.
    Bottom,
}

/// Background of the bar.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundStyle {
    /// Height of the bar in points.
    /// Default: 32
    pub height: u32,

    /// Fill color of the bar.
    /// Default: "0x44000000"
    pub color: Rgba,

    /// Corner radius of the bar background.
    /// Default: 0
    pub corner_radius: u32,

    /// Width of the border drawn around the bar.
    /// Default: 0
    pub border_width: u32,

    /// Color of the border drawn around the bar.
    /// Default: transparent
    pub border_color: Rgba,

    /// Space reserved before the first left item.
    /// Default: 0
    pub padding_left: u32,

    /// Space reserved after the first right item.
    /// Default: 0
    pub padding_right: u32,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            height: 32,
            color: Rgba::from_argb(0x4400_0000),
            corner_radius: 0,
            border_width: 0,
            border_color: Rgba::TRANSPARENT,
            padding_left: 0,
            padding_right: 0,
        }
    }
}

/// Global style shared by all bars.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BarStyle {
    /// Display edge the bar is anchored to.
    /// Default: "top"
    pub position: BarPlacement,

    /// Whether the bar covers the menu bar instead of sitting below it.
    /// Default: false
    pub topmost: bool,

    /// Horizontal margin between the bar and the display edges.
    /// Default: 0
    pub margin: u32,

    /// Vertical offset from the anchored edge.
    /// Default: 0
    pub y_offset: i32,

    /// Window-server level of the bar window.
    /// Default: 25 (status window level)
    pub window_level: i32,

    /// Background blur radius applied by the window server.
    /// Default: 0
    pub blur_radius: u32,

    /// Whether the window server draws a shadow below the bar.
    /// Default: false
    pub shadow: bool,

    /// Whether text drawn into the bar uses font smoothing.
    /// Default: false
    pub font_smoothing: bool,

    /// Bar background.
    pub background: BackgroundStyle,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            position: BarPlacement::Top,
            topmost: false,
            margin: 0,
            y_offset: 0,
            window_level: 25,
            blur_radius: 0,
            shadow: false,
            font_smoothing: false,
            background: BackgroundStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_top_anchored() {
        let style = BarStyle::default();
        assert_eq!(style.position, BarPlacement::Top);
        assert_eq!(style.background.height, 32);
        assert!(!style.shadow);
    }

    #[test]
    fn partial_style_keeps_defaults() {
        let style: BarStyle = serde_json::from_str(
            r#"{ "position": "bottom", "yOffset": 4, "background": { "paddingLeft": 10 } }"#,
        )
        .unwrap();

        assert_eq!(style.position, BarPlacement::Bottom);
        assert_eq!(style.y_offset, 4);
        assert_eq!(style.background.padding_left, 10);
        assert_eq!(style.background.height, 32);
        assert_eq!(style.window_level, 25);
    }

    #[test]
    fn background_colors_parse() {
        let background: BackgroundStyle =
            serde_json::from_str(r##"{ "color": "#ff0000", "borderColor": "0x80ffffff" }"##)
                .unwrap();

        assert_eq!(background.color.to_argb(), 0xFFFF_0000);
        assert_eq!(background.border_color.to_argb(), 0x80FF_FFFF);
    }
}
