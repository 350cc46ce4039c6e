//! Bar items.
//!
//! Items are owned by the [`ItemRegistry`] and shared by every bar. A bar
//! never owns an item: it reads the item's [`ItemLayout`] to decide whether
//! and where the item goes, then asks the item to measure, place and draw
//! itself through the [`BarItem`] trait.

mod fixed;
mod registry;

pub use fixed::FixedItem;
pub use registry::{ItemId, ItemRegistry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::platform::Canvas;

/// Region of the bar an item is placed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Filled left to right from the left padding.
    #[default]
    Left,
    /// Centered as a group.
    Center,
    /// Filled right to left from the right padding, in registry order.
    Right,
}

/// Distinguishes space indicators from ordinary items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Any item.
    #[default]
    Item,
    /// An item representing a space; it bypasses the space mask.
    Space,
}

/// Pointer events an item subscribes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMask(u32);

impl UpdateMask {
    /// No subscriptions.
    pub const NONE: Self = Self(0);
    /// Pointer entered the item.
    pub const MOUSE_ENTERED: Self = Self(1 << 0);
    /// Pointer exited the item.
    pub const MOUSE_EXITED: Self = Self(1 << 1);

    /// Returns the union of both masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    /// Returns whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    /// Returns whether the item needs a pointer-tracking region.
    #[must_use]
    pub const fn tracks_hover(self) -> bool {
        self.contains(Self::MOUSE_ENTERED) || self.contains(Self::MOUSE_EXITED)
    }
}

/// Layout-relevant properties of an item.
///
/// Association masks use bit `k` for display/space index `k`; a zero mask
/// means the item is not restricted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLayout {
    /// Region of the bar.
    pub position: Position,
    /// Master visibility switch.
    pub drawing: bool,
    /// Bar display indices the item is restricted to.
    pub associated_display_mask: u32,
    /// Space indices the item is restricted to.
    pub associated_space_mask: u32,
    /// Item kind.
    pub kind: ItemKind,
    /// Whether `custom_width` overrides the natural length.
    pub has_const_width: bool,
    /// Width enforced when `has_const_width` is set.
    pub custom_width: u32,
    /// Space before the item.
    pub padding_left: u32,
    /// Space after the item.
    pub padding_right: u32,
    /// Pointer subscriptions.
    pub update_mask: UpdateMask,
}

impl Default for ItemLayout {
    fn default() -> Self {
        Self {
            position: Position::Left,
            drawing: true,
            associated_display_mask: 0,
            associated_space_mask: 0,
            kind: ItemKind::Item,
            has_const_width: false,
            custom_width: 0,
            padding_left: 0,
            padding_right: 0,
            update_mask: UpdateMask::NONE,
        }
    }
}

impl ItemLayout {
    /// Sum of both paddings.
    #[must_use]
    pub fn padding(&self) -> f64 { f64::from(self.padding_left) + f64::from(self.padding_right) }
}

/// An item placed into bars.
///
/// Everything about the item's content (text, icons, graphs) lives behind
/// this trait; the bar only needs lengths, a bounding rect and a draw call.
pub trait BarItem {
    /// Name shown in logs and layout reports.
    fn name(&self) -> &str;

    /// Returns the properties that drive visibility and layout.
    fn layout(&self) -> &ItemLayout;

    /// Gives mutable access to the layout properties.
    fn layout_mut(&mut self) -> &mut ItemLayout;

    /// Measures the item.
    ///
    /// With `natural` set the content length is reported even when a
    /// constant width is configured; otherwise the effective width is returned.
    fn measure_length(&self, natural: bool) -> u32;

    /// Sets whether the item's graph grows right to left.
    fn set_right_to_left(&mut self, right_to_left: bool);

    /// Places the item and records its bounding rect.
    ///
    /// `y` is the vertical center line of the bar. Returns the length the
    /// item occupies on screen.
    fn calculate_bounds(&mut self, height: f64, x: f64, y: f64) -> u32;

    /// Returns the rect recorded by the last [`calculate_bounds`](Self::calculate_bounds).
    fn bounding_rect(&self) -> Rect;

    /// Stores the on-screen bounding rect of the item for the bar at `display_index`.
    fn set_bounding_rect_for_display(&mut self, display_index: u32, origin: Point);

    /// Draws the item into a bar canvas.
    fn draw(&mut self, canvas: &mut dyn Canvas);
}
