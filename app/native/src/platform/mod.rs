//! Platform seams of the bar compositor.
//!
//! Bars never talk to the window server directly. Everything they need is
//! expressed through the traits in this module:
//!
//! - [`Compositor`] - windows, regions, ordering, tracking areas, update batching
//! - [`Canvas`] - the drawing surface bound to a bar window
//! - [`DisplayGeometry`] - display bounds and menu bar state
//! - [`SpaceResolver`] - the active space of a display
//!
//! Backends:
//!
//! - [`headless`] - in-memory implementation recording every call
//! - `skylight` - the macOS window server (only on macOS)

pub mod headless;
#[cfg(target_os = "macos")]
pub mod skylight;

use crate::config::Rgba;
use crate::geometry::{Point, Rect};

/// Window-server identifier of a window.
pub type WindowId = u32;

/// Where to put a window in the window-server z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOrder {
    /// Order the window below `relative_to` (0 means below everything at its level).
    Below {
        /// Reference window.
        relative_to: WindowId,
    },
    /// Order the window in, above `relative_to` (0 means above everything at its level).
    Above {
        /// Reference window.
        relative_to: WindowId,
    },
}

impl WindowOrder {
    /// Below every other window, where the fence parks a window while it changes.
    pub const HIDDEN: Self = Self::Below { relative_to: 0 };
}

/// Window-server tag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTags(u64);

impl WindowTags {
    /// Window is drawn with high-quality resampling.
    pub const HIGH_QUALITY_RESAMPLING: Self = Self(1 << 4);
    /// Window follows the user across spaces.
    pub const STICKY: Self = Self(1 << 11);
    /// Window stays visible even over full-screen spaces.
    pub const SUPER_STICKY: Self = Self(1 << 45);

    /// Returns the union of both tag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    /// Returns the raw tag bits.
    #[must_use]
    pub const fn bits(self) -> u64 { self.0 }
}

/// Image interpolation used when the window server scales a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest neighbour.
    None,
}

/// Fill and border of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Rgba,
    /// Corner radius.
    pub corner_radius: f64,
    /// Border width; 0 draws no border.
    pub border_width: f64,
    /// Border color.
    pub border_color: Rgba,
}

impl RectStyle {
    /// A borderless, square-cornered fill.
    #[must_use]
    pub const fn filled(fill: Rgba) -> Self {
        Self {
            fill,
            corner_radius: 0.0,
            border_width: 0.0,
            border_color: Rgba::TRANSPARENT,
        }
    }
}

/// A drawing surface bound to one bar window.
pub trait Canvas {
    /// Sets the interpolation quality.
    fn set_interpolation(&mut self, interpolation: Interpolation);

    /// Enables or disables font smoothing.
    fn set_font_smoothing(&mut self, enabled: bool);

    /// Clears `rect` and paints a rounded rectangle into it.
    fn draw_rect(&mut self, rect: Rect, style: &RectStyle);

    /// Pushes pending drawing to the window server.
    fn flush(&mut self);
}

/// Native window and compositing primitives.
///
/// All calls are treated as succeeding; backends log failures themselves.
pub trait Compositor {
    /// Opaque region describing a window shape.
    type Region;
    /// Drawing surface bound to a window; dropping it releases the surface.
    type Canvas: Canvas + 'static;

    /// Creates a region covering `rect`.
    fn new_region(&self, rect: Rect) -> Self::Region;

    /// Creates a window with the given shape at `origin`.
    fn new_window(&self, origin: Point, region: &Self::Region) -> WindowId;

    /// Destroys a window.
    fn release_window(&self, window: WindowId);

    /// Moves and reshapes a window.
    fn set_window_shape(&self, window: WindowId, origin: Point, region: &Self::Region);

    /// Adds a region in which the window accepts pointer activation.
    fn add_activation_region(&self, window: WindowId, region: &Self::Region);

    /// Removes every activation region of the window.
    fn clear_activation_region(&self, window: WindowId);

    /// Sets the backing resolution scale.
    fn set_resolution(&self, window: WindowId, scale: f64);

    /// Sets tag bits on the window.
    fn set_window_tags(&self, window: WindowId, tags: WindowTags);

    /// Clears tag bits on the window.
    fn clear_window_tags(&self, window: WindowId, tags: WindowTags);

    /// Marks the window opaque or transparent.
    fn set_window_opacity(&self, window: WindowId, opaque: bool);

    /// Sets the background blur radius.
    fn set_blur_radius(&self, window: WindowId, radius: u32);

    /// Removes the window shadow.
    fn disable_shadow(&self, window: WindowId);

    /// Sets the window level.
    fn set_window_level(&self, window: WindowId, level: i32);

    /// Changes the z-order of the window.
    fn order_window(&self, window: WindowId, order: WindowOrder);

    /// Stops presenting changes until [`reenable_update`](Self::reenable_update).
    fn disable_update(&self);

    /// Presents every change made since [`disable_update`](Self::disable_update).
    fn reenable_update(&self);

    /// Registers a pointer-tracking rectangle in window coordinates.
    fn add_tracking_rect(&self, window: WindowId, rect: Rect);

    /// Removes every tracking rectangle of the window.
    fn remove_all_tracking_areas(&self, window: WindowId);

    /// Creates the drawing surface of a window.
    fn create_canvas(&self, window: WindowId) -> Self::Canvas;
}

/// Display bounds and menu bar state.
pub trait DisplayGeometry {
    /// Global bounds of a display.
    fn bounds(&self, display_id: u32) -> Rect;

    /// Whether the menu bar is currently shown (not auto-hidden).
    fn menu_bar_visible(&self) -> bool;

    /// Menu bar rect on a display.
    fn menu_bar_rect(&self, display_id: u32) -> Rect;
}

/// Resolves the active space of a display.
pub trait SpaceResolver {
    /// Mission-control index (1-based) of the active space on a display, 0 when unknown.
    fn space_id_for_display(&self, display_id: u32) -> u32;
}

/// RAII guard batching compositor changes into one presentation.
///
/// Creating the fence disables updates and orders the window below everything
/// ([`WindowOrder::HIDDEN`]); dropping it
/// orders the window back in and re-enables updates, so no intermediate state
/// is ever presented.
#[derive(Debug)]
pub struct UpdateFence<'a, C: Compositor + ?Sized> {
    compositor: &'a C,
    window: WindowId,
    show: WindowOrder,
}

impl<'a, C: Compositor + ?Sized> UpdateFence<'a, C> {
    /// Opens a fence around `window`; `show` is applied when the fence closes.
    #[must_use]
    pub fn new(compositor: &'a C, window: WindowId, show: WindowOrder) -> Self {
        compositor.disable_update();
        compositor.order_window(window, WindowOrder::HIDDEN);
        Self { compositor, window, show }
    }
}

impl<C: Compositor + ?Sized> Drop for UpdateFence<'_, C> {
    fn drop(&mut self) {
        self.compositor.order_window(self.window, self.show);
        self.compositor.reenable_update();
    }
}

#[cfg(test)]
mod tests {
    use super::headless::{CompositorCall, HeadlessCompositor};
    use super::*;

    #[test]
    fn tags_union_combines_bits() {
        let tags = WindowTags::STICKY.union(WindowTags::HIGH_QUALITY_RESAMPLING);
        assert_eq!(tags.bits(), (1 << 11) | (1 << 4));
    }

    #[test]
    fn fence_brackets_operations() {
        let compositor = HeadlessCompositor::new();

        {
            let _fence = UpdateFence::new(&compositor, 7, WindowOrder::Above { relative_to: 7 });
            compositor.remove_all_tracking_areas(7);
        }

        assert_eq!(
            compositor.calls(),
            vec![
                CompositorCall::DisableUpdate,
                CompositorCall::OrderWindow(7, WindowOrder::Below { relative_to: 0 }),
                CompositorCall::RemoveAllTrackingAreas(7),
                CompositorCall::OrderWindow(7, WindowOrder::Above { relative_to: 7 }),
                CompositorCall::ReenableUpdate,
            ]
        );
    }
}
