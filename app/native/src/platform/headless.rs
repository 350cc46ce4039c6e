//! In-memory backend.
//!
//! [`HeadlessCompositor`] hands out window ids and records every call in
//! order instead of talking to a window server. It backs `ribbon layout`
//! and the test suite, which inspect the recorded calls to check fencing,
//! tracking areas and the window lifecycle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{
    Canvas, Compositor, DisplayGeometry, Interpolation, RectStyle, SpaceResolver, WindowId,
    WindowOrder, WindowTags,
};
use crate::geometry::{Point, Rect};

/// A recorded canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    /// Interpolation quality changed.
    SetInterpolation(Interpolation),
    /// Font smoothing toggled.
    SetFontSmoothing(bool),
    /// Rounded rect painted.
    DrawRect(Rect, RectStyle),
    /// Canvas flushed.
    Flush,
}

/// A recorded compositor operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositorCall {
    /// Region created.
    NewRegion(Rect),
    /// Window created.
    NewWindow(WindowId, Point),
    /// Window released.
    ReleaseWindow(WindowId),
    /// Window reshaped.
    SetWindowShape(WindowId, Point, Rect),
    /// Activation region added.
    AddActivationRegion(WindowId, Rect),
    /// Activation regions cleared.
    ClearActivationRegion(WindowId),
    /// Resolution set.
    SetResolution(WindowId, f64),
    /// Tags set.
    SetWindowTags(WindowId, WindowTags),
    /// Tags cleared.
    ClearWindowTags(WindowId, WindowTags),
    /// Opacity set.
    SetWindowOpacity(WindowId, bool),
    /// Blur radius set.
    SetBlurRadius(WindowId, u32),
    /// Shadow disabled.
    DisableShadow(WindowId),
    /// Level set.
    SetWindowLevel(WindowId, i32),
    /// Window ordered.
    OrderWindow(WindowId, WindowOrder),
    /// Updates disabled.
    DisableUpdate,
    /// Updates re-enabled.
    ReenableUpdate,
    /// Tracking rect added.
    AddTrackingRect(WindowId, Rect),
    /// Tracking rects removed.
    RemoveAllTrackingAreas(WindowId),
    /// Canvas created.
    CreateCanvas(WindowId),
    /// Canvas released (dropped).
    ReleaseCanvas(WindowId),
    /// Operation on the canvas of a window.
    Canvas(WindowId, CanvasCall),
}

#[derive(Debug, Default)]
struct HeadlessState {
    calls: Vec<CompositorCall>,
    next_window: WindowId,
    live_windows: Vec<WindowId>,
    live_canvases: Vec<WindowId>,
    tracking: HashMap<WindowId, Vec<Rect>>,
    invalid_releases: usize,
    update_depth: i32,
}

impl HeadlessState {
    fn record(&mut self, call: CompositorCall) { self.calls.push(call); }
}

/// Compositor recording calls in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessCompositor {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessCompositor {
    /// Creates a compositor with no windows.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<CompositorCall> { self.state.borrow().calls.clone() }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) { self.state.borrow_mut().calls.clear(); }

    /// Windows created and not yet released.
    #[must_use]
    pub fn live_windows(&self) -> Vec<WindowId> { self.state.borrow().live_windows.clone() }

    /// Windows with a live canvas.
    #[must_use]
    pub fn live_canvases(&self) -> Vec<WindowId> { self.state.borrow().live_canvases.clone() }

    /// Tracking rects currently registered on a window.
    #[must_use]
    pub fn tracking_rects(&self, window: WindowId) -> Vec<Rect> {
        self.state.borrow().tracking.get(&window).cloned().unwrap_or_default()
    }

    /// Releases of windows or canvases that were not live.
    #[must_use]
    pub fn invalid_releases(&self) -> usize { self.state.borrow().invalid_releases }

    /// Current nesting depth of disabled updates; 0 when presentation is live.
    #[must_use]
    pub fn update_depth(&self) -> i32 { self.state.borrow().update_depth }

    /// Canvas operations recorded for a window, in order.
    #[must_use]
    pub fn canvas_calls(&self, window: WindowId) -> Vec<CanvasCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                CompositorCall::Canvas(id, canvas_call) if *id == window => {
                    Some(canvas_call.clone())
                }
                _ => None,
            })
            .collect()
    }
}

/// Canvas recording into the compositor's call log.
#[derive(Debug)]
pub struct HeadlessCanvas {
    window: WindowId,
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessCanvas {
    fn record(&self, call: CanvasCall) {
        self.state.borrow_mut().record(CompositorCall::Canvas(self.window, call));
    }
}

impl Drop for HeadlessCanvas {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if let Some(index) = state.live_canvases.iter().position(|id| *id == self.window) {
            state.live_canvases.remove(index);
        } else {
            state.invalid_releases += 1;
        }
        state.record(CompositorCall::ReleaseCanvas(self.window));
    }
}

impl Canvas for HeadlessCanvas {
    fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.record(CanvasCall::SetInterpolation(interpolation));
    }

    fn set_font_smoothing(&mut self, enabled: bool) {
        self.record(CanvasCall::SetFontSmoothing(enabled));
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) {
        self.record(CanvasCall::DrawRect(rect, *style));
    }

    fn flush(&mut self) { self.record(CanvasCall::Flush); }
}

impl Compositor for HeadlessCompositor {
    type Canvas = HeadlessCanvas;
    type Region = Rect;

    fn new_region(&self, rect: Rect) -> Rect {
        self.state.borrow_mut().record(CompositorCall::NewRegion(rect));
        rect
    }

    fn new_window(&self, origin: Point, _region: &Rect) -> WindowId {
        let mut state = self.state.borrow_mut();
        state.next_window += 1;
        let window = state.next_window;
        state.live_windows.push(window);
        state.record(CompositorCall::NewWindow(window, origin));
        window
    }

    fn release_window(&self, window: WindowId) {
        let mut state = self.state.borrow_mut();
        if let Some(index) = state.live_windows.iter().position(|id| *id == window) {
            state.live_windows.remove(index);
            state.tracking.remove(&window);
        } else {
            state.invalid_releases += 1;
        }
        state.record(CompositorCall::ReleaseWindow(window));
    }

    fn set_window_shape(&self, window: WindowId, origin: Point, region: &Rect) {
        self.state.borrow_mut().record(CompositorCall::SetWindowShape(window, origin, *region));
    }

    fn add_activation_region(&self, window: WindowId, region: &Rect) {
        self.state.borrow_mut().record(CompositorCall::AddActivationRegion(window, *region));
    }

    fn clear_activation_region(&self, window: WindowId) {
        self.state.borrow_mut().record(CompositorCall::ClearActivationRegion(window));
    }

    fn set_resolution(&self, window: WindowId, scale: f64) {
        self.state.borrow_mut().record(CompositorCall::SetResolution(window, scale));
    }

    fn set_window_tags(&self, window: WindowId, tags: WindowTags) {
        self.state.borrow_mut().record(CompositorCall::SetWindowTags(window, tags));
    }

    fn clear_window_tags(&self, window: WindowId, tags: WindowTags) {
        self.state.borrow_mut().record(CompositorCall::ClearWindowTags(window, tags));
    }

    fn set_window_opacity(&self, window: WindowId, opaque: bool) {
        self.state.borrow_mut().record(CompositorCall::SetWindowOpacity(window, opaque));
    }

    fn set_blur_radius(&self, window: WindowId, radius: u32) {
        self.state.borrow_mut().record(CompositorCall::SetBlurRadius(window, radius));
    }

    fn disable_shadow(&self, window: WindowId) {
        self.state.borrow_mut().record(CompositorCall::DisableShadow(window));
    }

    fn set_window_level(&self, window: WindowId, level: i32) {
        self.state.borrow_mut().record(CompositorCall::SetWindowLevel(window, level));
    }

    fn order_window(&self, window: WindowId, order: WindowOrder) {
        self.state.borrow_mut().record(CompositorCall::OrderWindow(window, order));
    }

    fn disable_update(&self) {
        let mut state = self.state.borrow_mut();
        state.update_depth += 1;
        state.record(CompositorCall::DisableUpdate);
    }

    fn reenable_update(&self) {
        let mut state = self.state.borrow_mut();
        state.update_depth -= 1;
        state.record(CompositorCall::ReenableUpdate);
    }

    fn add_tracking_rect(&self, window: WindowId, rect: Rect) {
        let mut state = self.state.borrow_mut();
        state.tracking.entry(window).or_default().push(rect);
        state.record(CompositorCall::AddTrackingRect(window, rect));
    }

    fn remove_all_tracking_areas(&self, window: WindowId) {
        let mut state = self.state.borrow_mut();
        state.tracking.remove(&window);
        state.record(CompositorCall::RemoveAllTrackingAreas(window));
    }

    fn create_canvas(&self, window: WindowId) -> HeadlessCanvas {
        let mut state = self.state.borrow_mut();
        state.live_canvases.push(window);
        state.record(CompositorCall::CreateCanvas(window));
        HeadlessCanvas { window, state: Rc::clone(&self.state) }
    }
}

/// Fixed display geometry and spaces.
#[derive(Debug, Clone)]
pub struct HeadlessDisplays {
    bounds: HashMap<u32, Rect>,
    spaces: HashMap<u32, u32>,
    menu_bar_visible: bool,
    menu_bar_height: f64,
}

impl Default for HeadlessDisplays {
    fn default() -> Self {
        Self {
            bounds: HashMap::new(),
            spaces: HashMap::new(),
            menu_bar_visible: false,
            menu_bar_height: 25.0,
        }
    }
}

impl HeadlessDisplays {
    /// Creates an empty display set.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Adds a display with its global bounds and active space.
    #[must_use]
    pub fn with_display(mut self, display_id: u32, bounds: Rect, space: u32) -> Self {
        self.bounds.insert(display_id, bounds);
        self.spaces.insert(display_id, space);
        self
    }

    /// Shows the menu bar with the given height.
    #[must_use]
    pub const fn with_menu_bar(mut self, height: f64) -> Self {
        self.menu_bar_visible = true;
        self.menu_bar_height = height;
        self
    }

    /// Changes the active space of a display.
    pub fn set_space(&mut self, display_id: u32, space: u32) { self.spaces.insert(display_id, space); }
}

impl DisplayGeometry for HeadlessDisplays {
    fn bounds(&self, display_id: u32) -> Rect {
        self.bounds.get(&display_id).copied().unwrap_or_default()
    }

    fn menu_bar_visible(&self) -> bool { self.menu_bar_visible }

    fn menu_bar_rect(&self, display_id: u32) -> Rect {
        let bounds = self.bounds(display_id);
        Rect::new(bounds.x, bounds.y, bounds.width, self.menu_bar_height)
    }
}

impl SpaceResolver for HeadlessDisplays {
    fn space_id_for_display(&self, display_id: u32) -> u32 {
        self.spaces.get(&display_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_get_fresh_ids() {
        let compositor = HeadlessCompositor::new();
        let region = compositor.new_region(Rect::with_size(10.0, 10.0));

        let a = compositor.new_window(Point::default(), &region);
        let b = compositor.new_window(Point::default(), &region);

        assert_ne!(a, b);
        assert_eq!(compositor.live_windows(), vec![a, b]);
    }

    #[test]
    fn releasing_unknown_window_is_counted() {
        let compositor = HeadlessCompositor::new();
        let region = compositor.new_region(Rect::with_size(10.0, 10.0));
        let window = compositor.new_window(Point::default(), &region);

        compositor.release_window(window);
        compositor.release_window(window);

        assert!(compositor.live_windows().is_empty());
        assert_eq!(compositor.invalid_releases(), 1);
    }

    #[test]
    fn canvas_calls_are_attributed_to_window() {
        let compositor = HeadlessCompositor::new();
        let mut canvas = compositor.create_canvas(3);

        canvas.flush();
        drop(canvas);

        assert_eq!(compositor.canvas_calls(3), vec![CanvasCall::Flush]);
        assert!(compositor.live_canvases().is_empty());
    }

    #[test]
    fn tracking_rects_are_cleared() {
        let compositor = HeadlessCompositor::new();
        compositor.add_tracking_rect(1, Rect::with_size(5.0, 5.0));
        assert_eq!(compositor.tracking_rects(1).len(), 1);

        compositor.remove_all_tracking_areas(1);
        assert!(compositor.tracking_rects(1).is_empty());
    }

    #[test]
    fn displays_report_geometry_and_spaces() {
        let displays = HeadlessDisplays::new()
            .with_display(1, Rect::new(0.0, 0.0, 1440.0, 900.0), 2)
            .with_menu_bar(24.0);

        assert!(displays.menu_bar_visible());
        assert!((displays.menu_bar_rect(1).height - 24.0).abs() < f64::EPSILON);
        assert_eq!(displays.space_id_for_display(1), 2);
        assert_eq!(displays.space_id_for_display(9), 0);
    }
}
