//! Draw pass: paints the background and every visible item of one bar.

use super::visibility::VisibilityFilter;
use super::window::Surface;
use crate::association::AssociationTable;
use crate::config::BarStyle;
use crate::geometry::{Point, Rect};
use crate::items::ItemRegistry;
use crate::platform::{Canvas, Compositor, RectStyle, UpdateFence, WindowOrder};

/// Pixels trimmed from each side of an item's bounds for hover tracking.
const TRACKING_INSET: f64 = 1.0;

/// The bar being drawn.
#[derive(Debug, Clone, Copy)]
pub(super) struct DrawTarget {
    pub frame: Rect,
    pub origin: Point,
    pub filter: VisibilityFilter,
}

/// Fill and border of the bar background.
#[must_use]
pub fn background_style(style: &BarStyle) -> RectStyle {
    RectStyle {
        fill: style.background.color,
        corner_radius: f64::from(style.background.corner_radius),
        border_width: f64::from(style.background.border_width),
        border_color: style.background.border_color,
    }
}

/// Draws the bar inside an update fence and rewrites its association row.
///
/// Items must already carry their bounds from the layout pass.
pub(super) fn draw_bar<C: Compositor>(
    compositor: &C,
    surface: &mut Surface<C>,
    target: DrawTarget,
    style: &BarStyle,
    items: &mut ItemRegistry,
    associations: &mut AssociationTable,
) {
    let window = surface.window();
    let _fence = UpdateFence::new(compositor, window, WindowOrder::Above { relative_to: window });

    compositor.remove_all_tracking_areas(window);

    let canvas = surface.canvas_mut();
    canvas.draw_rect(target.frame, &background_style(style));

    let display_index = target.filter.display_index;
    let mut pass = associations.begin(display_index);

    for (id, item) in items.iter_mut() {
        if !target.filter.should_draw(item.layout()) {
            continue;
        }
        pass.confirm(id);

        if item.layout().update_mask.tracks_hover() {
            let tracking = item.bounding_rect().inset(TRACKING_INSET, TRACKING_INSET);
            compositor.add_tracking_rect(window, tracking);
        }

        item.set_bounding_rect_for_display(display_index, target.origin);
        item.draw(canvas);
    }

    pass.commit();
    canvas.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgba;

    #[test]
    fn background_style_follows_bar_style() {
        let mut style = BarStyle::default();
        style.background.corner_radius = 9;
        style.background.border_width = 2;
        style.background.border_color = Rgba::from_argb(0xff00_ff00);

        let rect_style = background_style(&style);

        assert_eq!(rect_style.fill, Rgba::from_argb(0x4400_0000));
        assert!((rect_style.corner_radius - 9.0).abs() < f64::EPSILON);
        assert!((rect_style.border_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(rect_style.border_color, Rgba::from_argb(0xff00_ff00));
    }
}
