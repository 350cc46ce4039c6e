//! One bar per display.
//!
//! A [`Bar`] owns the native surface of its display while it is visible and
//! runs the layout and draw passes over the shared item registry held by the
//! [`BarManager`]. Every presentation change happens inside an
//! [`UpdateFence`](crate::platform::UpdateFence), so no half-drawn bar is
//! ever shown.

mod draw;
pub mod layout;
pub mod visibility;
pub mod window;

use std::fmt;
use std::rc::Rc;

pub use draw::background_style;
pub use layout::{Placement, layout_items, region_length};
pub use visibility::VisibilityFilter;
pub use window::{BarFrame, Surface};

use crate::config::BarStyle;
use crate::geometry::{Point, Rect};
use crate::manager::BarManager;
use crate::platform::{
    Canvas, Compositor, DisplayGeometry, SpaceResolver, UpdateFence, WindowId, WindowOrder,
};

/// Horizontal gap reserved for a display notch once the window exists.
pub const DEFAULT_NOTCH_WIDTH: u32 = 100;

/// The bar of one display.
pub struct Bar<C: Compositor> {
    compositor: Rc<C>,
    display_id: u32,
    display_index: u32,
    space_id: u32,
    frame: Rect,
    origin: Point,
    notch_width: u32,
    surface: Option<Surface<C>>,
    placements: Vec<Placement>,
}

impl<C: Compositor> fmt::Debug for Bar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("display_id", &self.display_id)
            .field("display_index", &self.display_index)
            .field("space_id", &self.space_id)
            .field("frame", &self.frame)
            .field("origin", &self.origin)
            .field("hidden", &self.is_hidden())
            .finish_non_exhaustive()
    }
}

impl<C: Compositor> Bar<C> {
    /// Creates a visible bar on `display_id`.
    ///
    /// `display_index` is the 1-based association index of the bar, matched
    /// against item display masks.
    pub fn create(
        compositor: Rc<C>,
        display_id: u32,
        display_index: u32,
        manager: &BarManager,
        displays: &dyn DisplayGeometry,
        spaces: &dyn SpaceResolver,
    ) -> Self {
        let space_id = spaces.space_id_for_display(display_id);
        let mut bar = Self {
            compositor,
            display_id,
            display_index,
            space_id,
            frame: Rect::default(),
            origin: Point::default(),
            notch_width: 0,
            surface: None,
            placements: Vec::new(),
        };
        bar.open_window(&manager.style, displays);
        tracing::debug!(display_id, display_index, space_id, "bar created");
        bar
    }

    /// Closes the window and forgets what this bar was showing.
    pub fn destroy(mut self, manager: &mut BarManager) {
        self.close_window();
        manager.associations.remove_bar(self.display_index);
        tracing::debug!(display_id = self.display_id, "bar destroyed");
    }

    /// Lays out and draws every visible item.
    ///
    /// Does nothing while the bar is hidden or its space is unknown.
    pub fn redraw(&mut self, manager: &mut BarManager) {
        if self.space_id == 0 {
            tracing::debug!(display_id = self.display_id, "redraw skipped: no active space");
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(display_id = self.display_id, "redraw skipped: bar hidden");
            return;
        };

        let BarManager { style, items, associations } = manager;
        let filter = VisibilityFilter { display_index: self.display_index, space_index: self.space_id };

        self.placements = layout_items(self.frame, style, filter, items);

        let target = draw::DrawTarget { frame: self.frame, origin: self.origin, filter };
        draw::draw_bar(&*self.compositor, surface, target, style, items, associations);
    }

    /// Recomputes the frame from the display geometry, reshapes the window
    /// and redraws.
    ///
    /// Does nothing while the bar is hidden.
    pub fn resize(&mut self, manager: &mut BarManager, displays: &dyn DisplayGeometry) {
        let Some(window) = self.window_id() else {
            return;
        };

        let bar_frame = BarFrame::compute(self.display_id, &manager.style, displays);
        self.frame = bar_frame.frame;
        self.origin = bar_frame.origin;

        let compositor = Rc::clone(&self.compositor);
        let region = compositor.new_region(self.frame);
        let _fence = UpdateFence::new(&*compositor, window, WindowOrder::Above { relative_to: 0 });

        compositor.set_window_shape(window, self.origin, &region);
        compositor.clear_activation_region(window);
        compositor.add_activation_region(window, &region);
        compositor.remove_all_tracking_areas(window);

        tracing::debug!(display_id = self.display_id, frame = ?self.frame, origin = ?self.origin, "bar resized");
        self.redraw(manager);
    }

    /// Shows or hides the bar.
    ///
    /// Hiding closes the window; showing creates a fresh one. Redundant
    /// transitions do nothing.
    pub fn set_hidden(&mut self, hidden: bool, style: &BarStyle, displays: &dyn DisplayGeometry) {
        if self.is_hidden() == hidden {
            return;
        }

        if hidden {
            self.close_window();
        } else {
            self.open_window(style, displays);
        }
    }

    /// Toggles font smoothing on the bar's canvas.
    pub fn set_font_smoothing(&mut self, enabled: bool) {
        if let Some(surface) = self.surface.as_mut() {
            surface.canvas_mut().set_font_smoothing(enabled);
        }
    }

    /// Applies the style's blur radius to the window.
    pub fn set_blur_radius(&self, style: &BarStyle) {
        if let Some(window) = self.window_id() {
            self.compositor.set_blur_radius(window, style.blur_radius);
        }
    }

    /// Updates the active space the bar filters items against.
    pub fn set_space(&mut self, space_id: u32) { self.space_id = space_id; }

    /// Display the bar lives on.
    #[must_use]
    pub const fn display_id(&self) -> u32 { self.display_id }

    /// Association index of the bar.
    #[must_use]
    pub const fn display_index(&self) -> u32 { self.display_index }

    /// Mission-control index of the active space, 0 when unknown.
    #[must_use]
    pub const fn space_id(&self) -> u32 { self.space_id }

    /// Local rect of the bar.
    #[must_use]
    pub const fn frame(&self) -> Rect { self.frame }

    /// Global position of the bar window.
    #[must_use]
    pub const fn origin(&self) -> Point { self.origin }

    /// Gap reserved for a display notch.
    #[must_use]
    pub const fn notch_width(&self) -> u32 { self.notch_width }

    /// Whether the bar currently has no window.
    #[must_use]
    pub const fn is_hidden(&self) -> bool { self.surface.is_none() }

    /// Window of the bar, if visible.
    #[must_use]
    pub fn window_id(&self) -> Option<WindowId> { self.surface.as_ref().map(Surface::window) }

    /// Filter the bar applies to item masks.
    #[must_use]
    pub const fn filter(&self) -> VisibilityFilter {
        VisibilityFilter { display_index: self.display_index, space_index: self.space_id }
    }

    /// Placements of the last layout pass, in registry order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] { &self.placements }

    fn open_window(&mut self, style: &BarStyle, displays: &dyn DisplayGeometry) {
        let bar_frame = BarFrame::compute(self.display_id, style, displays);
        self.frame = bar_frame.frame;
        self.origin = bar_frame.origin;
        self.surface = Some(Surface::open(Rc::clone(&self.compositor), &bar_frame, style));
        self.notch_width = DEFAULT_NOTCH_WIDTH;
    }

    fn close_window(&mut self) { self.surface = None; }
}
