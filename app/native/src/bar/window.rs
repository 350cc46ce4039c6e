//! Bar window geometry and the native surface backing a visible bar.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::config::{BarPlacement, BarStyle};
use crate::geometry::{Point, Rect};
use crate::platform::{Canvas, Compositor, DisplayGeometry, Interpolation, WindowId, WindowTags};

/// Backing scale of bar windows.
const WINDOW_RESOLUTION: f64 = 2.0;

/// Where a bar sits on its display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarFrame {
    /// Local rect of the bar, origin at 0,0.
    pub frame: Rect,
    /// Global position of the bar window.
    pub origin: Point,
}

impl BarFrame {
    /// Computes the frame of the bar on `display_id` for the given style.
    #[must_use]
    pub fn compute(display_id: u32, style: &BarStyle, displays: &dyn DisplayGeometry) -> Self {
        let bounds = displays.bounds(display_id);
        let margin = f64::from(style.margin);
        let y_offset = f64::from(style.y_offset);
        let height = f64::from(style.background.height);
        let width = margin.mul_add(-2.0, bounds.width);

        let mut origin = Point::new(bounds.x + margin, bounds.y + y_offset);

        match style.position {
            BarPlacement::Bottom => {
                origin.y = y_offset.mul_add(-2.0, bounds.max_y() - height);
            }
            BarPlacement::Top => {
                if displays.menu_bar_visible() && !style.topmost {
                    origin.y += displays.menu_bar_rect(display_id).height;
                }
            }
        }

        Self { frame: Rect::with_size(width, height), origin }
    }
}

/// Releases the window when dropped.
struct WindowHandle<C: Compositor> {
    compositor: Rc<C>,
    id: WindowId,
}

impl<C: Compositor> Drop for WindowHandle<C> {
    fn drop(&mut self) {
        self.compositor.release_window(self.id);
        tracing::debug!(window = self.id, "bar window closed");
    }
}

/// The native window and canvas of a visible bar.
///
/// Opening the surface creates and configures the window. Dropping it
/// releases the canvas and then the window, exactly once.
pub struct Surface<C: Compositor> {
    // Field order matters: the canvas is released before its window.
    canvas: C::Canvas,
    window: WindowHandle<C>,
}

impl<C: Compositor> fmt::Debug for Surface<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface").field("window", &self.window.id).finish_non_exhaustive()
    }
}

impl<C: Compositor> Surface<C> {
    /// Creates a window for `frame` and configures it from `style`.
    pub fn open(compositor: Rc<C>, frame: &BarFrame, style: &BarStyle) -> Self {
        let region = compositor.new_region(frame.frame);
        let id = compositor.new_window(frame.origin, &region);
        compositor.add_activation_region(id, &region);
        drop(region);

        compositor.set_resolution(id, WINDOW_RESOLUTION);
        compositor.set_window_tags(id, WindowTags::STICKY.union(WindowTags::HIGH_QUALITY_RESAMPLING));
        compositor.clear_window_tags(id, WindowTags::SUPER_STICKY);
        compositor.set_window_opacity(id, false);
        compositor.set_blur_radius(id, style.blur_radius);
        if !style.shadow {
            compositor.disable_shadow(id);
        }
        compositor.set_window_level(id, style.window_level);

        let mut canvas = compositor.create_canvas(id);
        canvas.set_interpolation(Interpolation::None);
        canvas.set_font_smoothing(style.font_smoothing);

        tracing::debug!(window = id, origin = ?frame.origin, frame = ?frame.frame, "bar window created");

        Self { canvas, window: WindowHandle { compositor, id } }
    }

    /// Window-server id of the window.
    #[must_use]
    pub fn window(&self) -> WindowId { self.window.id }

    /// Drawing surface of the window.
    pub fn canvas_mut(&mut self) -> &mut C::Canvas { &mut self.canvas }
}
