//! Layout pass: places every visible item into its region.
//!
//! Each region keeps one running anchor. Left and center anchors advance
//! left to right. The right anchor moves right to left: it is pulled back
//! before an item is placed, so the first right item in registry order
//! takes the rightmost slot.

use serde::Serialize;

use super::visibility::VisibilityFilter;
use crate::config::BarStyle;
use crate::geometry::Rect;
use crate::items::{ItemId, ItemRegistry, Position};

/// Where the layout pass put an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Placed item.
    pub item: ItemId,
    /// Region of the item.
    pub position: Position,
    /// Anchor the item was placed at, in bar coordinates.
    pub x: f64,
    /// Length the item reported for itself.
    pub length: u32,
    /// Whether the item was laid out right to left.
    pub right_to_left: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchors {
    left: f64,
    center: f64,
    right: f64,
}

impl Anchors {
    fn new(frame: Rect, style: &BarStyle, center_length: f64) -> Self {
        Self {
            left: f64::from(style.background.padding_left),
            center: ((frame.width - center_length) / 2.0).trunc(),
            right: (frame.width - f64::from(style.background.padding_right)).trunc(),
        }
    }

    const fn for_position(&mut self, position: Position) -> &mut f64 {
        match position {
            Position::Left => &mut self.left,
            Position::Center => &mut self.center,
            Position::Right => &mut self.right,
        }
    }
}

/// Total length of the visible items of a region, paddings included.
///
/// Constant-width items count with their enforced width. Summed in `f64`
/// so that extreme configured lengths and paddings cannot overflow.
#[must_use]
pub fn region_length(items: &ItemRegistry, filter: VisibilityFilter, position: Position) -> f64 {
    items
        .iter()
        .map(|(_, item)| item)
        .filter(|item| item.layout().position == position && filter.should_draw(item.layout()))
        .map(|item| f64::from(item.measure_length(false)) + item.layout().padding())
        .sum()
}

/// Places every visible item of the registry into `frame`.
///
/// Items are told their anchor, height and vertical center through
/// [`calculate_bounds`](crate::items::BarItem::calculate_bounds) and keep
/// the resulting bounding rect; the placements are returned in registry order.
pub fn layout_items(
    frame: Rect,
    style: &BarStyle,
    filter: VisibilityFilter,
    items: &mut ItemRegistry,
) -> Vec<Placement> {
    let center_length = region_length(items, filter, Position::Center);
    let mut anchors = Anchors::new(frame, style, center_length);

    let height = (frame.height - (f64::from(style.background.border_width) + 1.0)).trunc();
    let y = (frame.height / 2.0).trunc();

    let mut placements = Vec::with_capacity(items.len());

    for (id, item) in items.iter_mut() {
        if !filter.should_draw(item.layout()) {
            continue;
        }

        let layout = item.layout();
        let position = layout.position;
        let padding = layout.padding();
        let has_const_width = layout.has_const_width;
        let custom_width = f64::from(layout.custom_width);

        let natural_length = f64::from(item.measure_length(true));
        let right_to_left = position == Position::Right;
        let anchor = anchors.for_position(position);

        if right_to_left {
            *anchor -= natural_length + padding;
        }

        item.set_right_to_left(right_to_left);
        let x = *anchor;
        let length = item.calculate_bounds(height, x, y);

        if right_to_left {
            // The anchor already moved by the natural length; shift it back so
            // the next item sits next to the enforced width instead.
            if has_const_width {
                *anchor += natural_length + padding - custom_width;
            }
        } else {
            *anchor += f64::from(length) + padding;
        }

        tracing::trace!(item = %id, ?position, x, length, "item placed");
        placements.push(Placement { item: id, position, x, length, right_to_left });
    }

    placements
}
