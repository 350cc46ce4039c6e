//! Fixed-length items.
//!
//! A [`FixedItem`] has a configured natural length and an optional
//! background color. It is what the configuration file produces and what
//! the layout preview and the tests place into bars.

use smallvec::SmallVec;

use super::{BarItem, ItemKind, ItemLayout, UpdateMask};
use crate::config::{ItemConfig, Rgba, mask_from_indices};
use crate::geometry::{Point, Rect};
use crate::platform::{Canvas, RectStyle};

/// Inline capacity for per-display bounding rects.
const DISPLAY_RECTS_INLINE_CAP: usize = 4;

/// An item with a fixed natural length.
#[derive(Debug, Clone)]
pub struct FixedItem {
    name: String,
    layout: ItemLayout,
    length: u32,
    color: Rgba,
    bounds: Rect,
    display_rects: SmallVec<[(u32, Rect); DISPLAY_RECTS_INLINE_CAP]>,
}

impl FixedItem {
    /// Creates a transparent item.
    #[must_use]
    pub fn new(name: impl Into<String>, layout: ItemLayout, length: u32) -> Self {
        Self {
            name: name.into(),
            layout,
            length,
            color: Rgba::TRANSPARENT,
            bounds: Rect::default(),
            display_rects: SmallVec::new(),
        }
    }

    /// Creates an item from its configuration entry.
    #[must_use]
    pub fn from_config(config: &ItemConfig) -> Self {
        let hover = if config.hover {
            UpdateMask::MOUSE_ENTERED.union(UpdateMask::MOUSE_EXITED)
        } else {
            UpdateMask::NONE
        };

        let layout = ItemLayout {
            position: config.position,
            drawing: config.drawing,
            associated_display_mask: mask_from_indices(&config.displays),
            associated_space_mask: mask_from_indices(&config.spaces),
            kind: if config.space_indicator { ItemKind::Space } else { ItemKind::Item },
            has_const_width: config.width.is_some(),
            custom_width: config.width.unwrap_or_default(),
            padding_left: config.padding_left,
            padding_right: config.padding_right,
            update_mask: hover,
        };

        Self::new(config.name.clone(), layout, config.length).with_color(config.color)
    }

    /// Sets the background color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// The on-screen rect stored for a bar, if the item was drawn there.
    ///
    /// Entries are not cleared when a bar stops showing the item, so the
    /// result is only current while `AssociationTable::is_shown(item,
    /// display_index)` holds.
    #[must_use]
    pub fn rect_for_display(&self, display_index: u32) -> Option<Rect> {
        self.display_rects
            .iter()
            .find(|(index, _)| *index == display_index)
            .map(|(_, rect)| *rect)
    }
}

impl BarItem for FixedItem {
    fn name(&self) -> &str { &self.name }

    fn layout(&self) -> &ItemLayout { &self.layout }

    fn layout_mut(&mut self) -> &mut ItemLayout { &mut self.layout }

    fn measure_length(&self, natural: bool) -> u32 {
        if self.layout.has_const_width && !natural {
            self.layout.custom_width
        } else {
            self.length
        }
    }

    // A solid fill looks the same in both directions.
    fn set_right_to_left(&mut self, _right_to_left: bool) {}

    fn calculate_bounds(&mut self, height: f64, x: f64, y: f64) -> u32 {
        let length = self.measure_length(false);
        self.bounds = Rect::new(
            x + f64::from(self.layout.padding_left),
            y - height / 2.0,
            f64::from(length),
            height,
        );
        length
    }

    fn bounding_rect(&self) -> Rect { self.bounds }

    // Overwrites the entry for `display_index`; other bars keep theirs even
    // after they stop showing the item.
    fn set_bounding_rect_for_display(&mut self, display_index: u32, origin: Point) {
        let rect = Rect::new(
            origin.x + self.bounds.x,
            origin.y + self.bounds.y,
            self.bounds.width,
            self.bounds.height,
        );

        match self.display_rects.iter_mut().find(|(index, _)| *index == display_index) {
            Some(entry) => entry.1 = rect,
            None => self.display_rects.push((display_index, rect)),
        }
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        if self.color.is_transparent() {
            return;
        }

        canvas.draw_rect(self.bounds, &RectStyle::filled(self.color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Position;

    #[test]
    fn const_width_overrides_effective_length_only() {
        let layout = ItemLayout { has_const_width: true, custom_width: 30, ..ItemLayout::default() };
        let item = FixedItem::new("clock", layout, 80);

        assert_eq!(item.measure_length(true), 80);
        assert_eq!(item.measure_length(false), 30);
    }

    #[test]
    fn bounds_are_centered_on_y_and_shifted_by_padding() {
        let layout = ItemLayout { padding_left: 4, ..ItemLayout::default() };
        let mut item = FixedItem::new("cpu", layout, 50);

        let length = item.calculate_bounds(20.0, 10.0, 16.0);

        assert_eq!(length, 50);
        assert_eq!(item.bounding_rect(), Rect::new(14.0, 6.0, 50.0, 20.0));
    }

    #[test]
    fn display_rects_are_offset_by_bar_origin() {
        let mut item = FixedItem::new("cpu", ItemLayout::default(), 50);
        item.calculate_bounds(20.0, 10.0, 16.0);

        item.set_bounding_rect_for_display(1, Point::new(100.0, 25.0));
        item.set_bounding_rect_for_display(1, Point::new(200.0, 25.0));

        assert_eq!(item.rect_for_display(1), Some(Rect::new(210.0, 31.0, 50.0, 20.0)));
        assert_eq!(item.rect_for_display(2), None);
    }

    #[test]
    fn display_rect_outlives_the_bar_showing_it() {
        let mut item = FixedItem::new("cpu", ItemLayout::default(), 50);
        item.calculate_bounds(20.0, 10.0, 16.0);
        item.set_bounding_rect_for_display(1, Point::new(0.0, 0.0));

        // the item moves and is only drawn on the second bar
        item.calculate_bounds(20.0, 40.0, 16.0);
        item.set_bounding_rect_for_display(2, Point::new(0.0, 0.0));

        assert_eq!(item.rect_for_display(1), Some(Rect::new(10.0, 6.0, 50.0, 20.0)));
        assert_eq!(item.rect_for_display(2), Some(Rect::new(40.0, 6.0, 50.0, 20.0)));
    }

    #[test]
    fn from_config_builds_layout() {
        let config = ItemConfig {
            name: "spaces".to_string(),
            position: Position::Center,
            spaces: vec![2],
            space_indicator: true,
            width: Some(24),
            hover: true,
            ..ItemConfig::default()
        };

        let item = FixedItem::from_config(&config);
        let layout = item.layout();

        assert_eq!(item.name(), "spaces");
        assert_eq!(layout.position, Position::Center);
        assert_eq!(layout.associated_space_mask, 0b100);
        assert_eq!(layout.kind, ItemKind::Space);
        assert!(layout.has_const_width);
        assert_eq!(layout.custom_width, 24);
        assert!(layout.update_mask.tracks_hover());
    }
}
