//! macOS window-server backend built on the private `SkyLight` framework.
//!
#![allow(clippy::doc_markdown)] // SkyLight, CGContext, etc. without backticks
//!
//! Bars are plain SkyLight windows owned by our connection. They are drawn
//! through a CGContext obtained with `SLWindowContextCreate`, so no AppKit
//! window machinery is involved.
//!
//! # Safety
//!
//! These APIs are private and undocumented. All unsafe code lives in this
//! module; every other part of the crate goes through the platform traits.
//! Failed calls are logged and otherwise ignored.

use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;
use std::sync::OnceLock;

use core_foundation::base::TCFType;
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::runloop::CFRunLoop;
use core_foundation::string::CFString;
use core_foundation_sys::array::{CFArrayGetCount, CFArrayGetValueAtIndex, CFArrayRef};
use core_foundation_sys::base::{CFEqual, CFRelease, CFTypeRef};
use core_foundation_sys::dictionary::{CFDictionaryGetValue, CFDictionaryRef};
use core_foundation_sys::number::{CFNumberGetValue, CFNumberRef, kCFNumberSInt64Type};
use core_foundation_sys::string::CFStringRef;
use core_graphics::display::CGDisplay;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use objc::runtime::{BOOL, Class, NO};
use objc::{msg_send, sel, sel_impl};

use super::{
    Canvas, Compositor, DisplayGeometry, Interpolation, RectStyle, SpaceResolver, WindowId,
    WindowOrder, WindowTags,
};
use crate::bar::Bar;
use crate::config::RibbonConfig;
use crate::error::RibbonError;
use crate::geometry::{Point, Rect};
use crate::manager::BarManager;

// ============================================================================
// FFI Declarations
// ============================================================================

type CGError = i32;
type CGContextRef = *mut c_void;
type CGPathRef = *mut c_void;

/// Backing store type of bar windows.
const BACKING_STORE_BUFFERED: i32 = 2;

/// `SLSOrderWindow` modes.
const ORDER_BELOW: i32 = -1;
const ORDER_ABOVE: i32 = 1;

/// Size in bits of the tag arrays passed to the window server.
const TAG_SIZE: i32 = 64;

/// `kCGInterpolationNone`.
const INTERPOLATION_NONE: i32 = 1;

/// `CGPathDrawingMode` values.
const PATH_FILL: i32 = 0;
const PATH_STROKE: i32 = 2;

#[link(name = "SkyLight", kind = "framework")]
unsafe extern "C" {
    fn SLSMainConnectionID() -> u32;
    fn SLSDisableUpdate(cid: u32) -> CGError;
    fn SLSReenableUpdate(cid: u32) -> CGError;

    fn CGSNewRegionWithRect(rect: *const CGRect, region: *mut CFTypeRef) -> CGError;

    fn SLSNewWindow(
        cid: u32,
        backing: i32,
        x: f32,
        y: f32,
        region: CFTypeRef,
        wid: *mut u32,
    ) -> CGError;
    fn SLSReleaseWindow(cid: u32, wid: u32) -> CGError;
    fn SLSSetWindowShape(cid: u32, wid: u32, x: f32, y: f32, region: CFTypeRef) -> CGError;
    fn SLSAddActivationRegion(cid: u32, wid: u32, region: CFTypeRef) -> CGError;
    fn SLSClearActivationRegion(cid: u32, wid: u32) -> CGError;
    fn SLSSetWindowResolution(cid: u32, wid: u32, resolution: f64) -> CGError;
    fn SLSSetWindowTags(cid: u32, wid: u32, tags: *const u64, tag_size: i32) -> CGError;
    fn SLSClearWindowTags(cid: u32, wid: u32, tags: *const u64, tag_size: i32) -> CGError;
    fn SLSSetWindowOpacity(cid: u32, wid: u32, opaque: bool) -> CGError;
    fn SLSSetWindowBackgroundBlurRadius(cid: u32, wid: u32, radius: u32) -> CGError;
    fn SLSWindowSetShadowProperties(wid: u32, properties: CFDictionaryRef) -> CGError;
    fn SLSSetWindowLevel(cid: u32, wid: u32, level: i32) -> CGError;
    fn SLSOrderWindow(cid: u32, wid: u32, mode: i32, relative_to: u32) -> CGError;

    fn SLSAddTrackingRect(cid: u32, wid: u32, rect: CGRect) -> CGError;
    fn SLSRemoveAllTrackingAreas(cid: u32, wid: u32) -> CGError;

    fn SLWindowContextCreate(cid: u32, wid: u32, options: CFDictionaryRef) -> CGContextRef;

    fn SLSGetMenuBarAutohideEnabled(cid: u32, enabled: *mut i32) -> CGError;
    fn SLSGetRevealedMenuBarBounds(rect: *mut CGRect, cid: u32, did: u32) -> CGError;
    fn SLSCopyManagedDisplaySpaces(cid: u32) -> CFArrayRef;
    fn SLSManagedDisplayGetCurrentSpace(cid: u32, uuid: CFStringRef) -> u64;
}

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGContextRelease(ctx: CGContextRef);
    fn CGContextFlush(ctx: CGContextRef);
    fn CGContextClearRect(ctx: CGContextRef, rect: CGRect);
    fn CGContextSetInterpolationQuality(ctx: CGContextRef, quality: i32);
    fn CGContextSetAllowsFontSmoothing(ctx: CGContextRef, allows: bool);
    fn CGContextSetRGBFillColor(ctx: CGContextRef, r: f64, g: f64, b: f64, a: f64);
    fn CGContextSetRGBStrokeColor(ctx: CGContextRef, r: f64, g: f64, b: f64, a: f64);
    fn CGContextSetLineWidth(ctx: CGContextRef, width: f64);
    fn CGContextAddPath(ctx: CGContextRef, path: CGPathRef);
    fn CGContextDrawPath(ctx: CGContextRef, mode: i32);

    fn CGPathCreateWithRoundedRect(
        rect: CGRect,
        corner_width: f64,
        corner_height: f64,
        transform: *const c_void,
    ) -> CGPathRef;
    fn CGPathRelease(path: CGPathRef);

    fn CGDisplayCreateUUIDFromDisplayID(did: u32) -> CFTypeRef;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFUUIDCreateString(allocator: *const c_void, uuid: CFTypeRef) -> CFStringRef;
}

#[link(name = "AppKit", kind = "framework")]
unsafe extern "C" {}

// ============================================================================
// Connection ID Cache
// ============================================================================

static CONNECTION_ID: OnceLock<u32> = OnceLock::new();

/// Returns the cached window server connection ID, 0 if none could be made.
#[must_use]
pub fn connection_id() -> u32 {
    *CONNECTION_ID.get_or_init(|| {
        let cid = unsafe { SLSMainConnectionID() };
        if cid == 0 {
            tracing::warn!("skylight: failed to get connection ID");
        }
        cid
    })
}

fn check(call: &'static str, window: WindowId, status: CGError) {
    if status != 0 {
        tracing::warn!(call, window, status, "skylight call failed");
    }
}

/// `SLSOrderWindow` mode and reference window of an order.
const fn order_mode(order: WindowOrder) -> (i32, WindowId) {
    match order {
        WindowOrder::Below { relative_to } => (ORDER_BELOW, relative_to),
        WindowOrder::Above { relative_to } => (ORDER_ABOVE, relative_to),
    }
}

fn cg_rect(rect: Rect) -> CGRect {
    CGRect::new(&CGPoint::new(rect.x, rect.y), &CGSize::new(rect.width, rect.height))
}

const fn from_cg_rect(rect: &CGRect) -> Rect {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

// ============================================================================
// Region
// ============================================================================

/// Window shape; released when dropped.
#[derive(Debug)]
pub struct Region(CFTypeRef);

impl Drop for Region {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { CFRelease(self.0) };
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// CGContext bound to a bar window.
#[derive(Debug)]
pub struct SkyLightCanvas {
    ctx: CGContextRef,
}

impl Canvas for SkyLightCanvas {
    fn set_interpolation(&mut self, interpolation: Interpolation) {
        if self.ctx.is_null() {
            return;
        }
        let quality = match interpolation {
            Interpolation::None => INTERPOLATION_NONE,
        };
        unsafe { CGContextSetInterpolationQuality(self.ctx, quality) };
    }

    fn set_font_smoothing(&mut self, enabled: bool) {
        if self.ctx.is_null() {
            return;
        }
        unsafe { CGContextSetAllowsFontSmoothing(self.ctx, enabled) };
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) {
        if self.ctx.is_null() {
            return;
        }

        // Stroke is centered on the path, keep it inside the rect.
        let half_border = style.border_width / 2.0;
        let path_rect = rect.inset(half_border, half_border);
        let max_radius = path_rect.width.min(path_rect.height).max(0.0) / 2.0;
        let radius = style.corner_radius.clamp(0.0, max_radius);

        unsafe {
            CGContextClearRect(self.ctx, cg_rect(rect));

            let path = CGPathCreateWithRoundedRect(cg_rect(path_rect), radius, radius, ptr::null());
            if path.is_null() {
                return;
            }

            let fill = style.fill;
            CGContextSetRGBFillColor(self.ctx, fill.r, fill.g, fill.b, fill.a);
            CGContextAddPath(self.ctx, path);
            CGContextDrawPath(self.ctx, PATH_FILL);

            if style.border_width > 0.0 {
                let border = style.border_color;
                CGContextSetRGBStrokeColor(self.ctx, border.r, border.g, border.b, border.a);
                CGContextSetLineWidth(self.ctx, style.border_width);
                CGContextAddPath(self.ctx, path);
                CGContextDrawPath(self.ctx, PATH_STROKE);
            }

            CGPathRelease(path);
        }
    }

    fn flush(&mut self) {
        if self.ctx.is_null() {
            return;
        }
        unsafe { CGContextFlush(self.ctx) };
    }
}

impl Drop for SkyLightCanvas {
    fn drop(&mut self) {
        if !self.ctx.is_null() {
            unsafe { CGContextRelease(self.ctx) };
        }
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// The macOS window server, reached through our main connection.
#[derive(Debug, Clone, Copy)]
pub struct SkyLight {
    cid: u32,
}

impl SkyLight {
    /// Connects to the window server.
    ///
    /// # Errors
    ///
    /// Returns `RibbonError::PlatformError` if no connection could be made.
    pub fn connect() -> Result<Self, RibbonError> {
        match connection_id() {
            0 => Err(RibbonError::PlatformError(
                "could not connect to the window server".to_string(),
            )),
            cid => Ok(Self { cid }),
        }
    }
}

impl Compositor for SkyLight {
    type Region = Region;
    type Canvas = SkyLightCanvas;

    fn new_region(&self, rect: Rect) -> Region {
        let rect = cg_rect(rect);
        let mut region: CFTypeRef = ptr::null();
        let status = unsafe { CGSNewRegionWithRect(&raw const rect, &raw mut region) };
        check("CGSNewRegionWithRect", 0, status);
        Region(region)
    }

    #[allow(clippy::cast_possible_truncation)] // The window server takes f32 coordinates
    fn new_window(&self, origin: Point, region: &Region) -> WindowId {
        let mut wid: u32 = 0;
        let status = unsafe {
            SLSNewWindow(
                self.cid,
                BACKING_STORE_BUFFERED,
                origin.x as f32,
                origin.y as f32,
                region.0,
                &raw mut wid,
            )
        };
        check("SLSNewWindow", wid, status);
        wid
    }

    fn release_window(&self, window: WindowId) {
        check("SLSReleaseWindow", window, unsafe { SLSReleaseWindow(self.cid, window) });
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_window_shape(&self, window: WindowId, origin: Point, region: &Region) {
        let status = unsafe {
            SLSSetWindowShape(self.cid, window, origin.x as f32, origin.y as f32, region.0)
        };
        check("SLSSetWindowShape", window, status);
    }

    fn add_activation_region(&self, window: WindowId, region: &Region) {
        let status = unsafe { SLSAddActivationRegion(self.cid, window, region.0) };
        check("SLSAddActivationRegion", window, status);
    }

    fn clear_activation_region(&self, window: WindowId) {
        let status = unsafe { SLSClearActivationRegion(self.cid, window) };
        check("SLSClearActivationRegion", window, status);
    }

    fn set_resolution(&self, window: WindowId, scale: f64) {
        let status = unsafe { SLSSetWindowResolution(self.cid, window, scale) };
        check("SLSSetWindowResolution", window, status);
    }

    fn set_window_tags(&self, window: WindowId, tags: WindowTags) {
        let bits = tags.bits();
        let status = unsafe { SLSSetWindowTags(self.cid, window, &raw const bits, TAG_SIZE) };
        check("SLSSetWindowTags", window, status);
    }

    fn clear_window_tags(&self, window: WindowId, tags: WindowTags) {
        let bits = tags.bits();
        let status = unsafe { SLSClearWindowTags(self.cid, window, &raw const bits, TAG_SIZE) };
        check("SLSClearWindowTags", window, status);
    }

    fn set_window_opacity(&self, window: WindowId, opaque: bool) {
        let status = unsafe { SLSSetWindowOpacity(self.cid, window, opaque) };
        check("SLSSetWindowOpacity", window, status);
    }

    fn set_blur_radius(&self, window: WindowId, radius: u32) {
        let status = unsafe { SLSSetWindowBackgroundBlurRadius(self.cid, window, radius) };
        check("SLSSetWindowBackgroundBlurRadius", window, status);
    }

    fn disable_shadow(&self, window: WindowId) {
        let properties = CFDictionary::from_CFType_pairs(&[(
            CFString::from_static_string("com.apple.WindowShadowDensity").as_CFType(),
            CFNumber::from(0_i32).as_CFType(),
        )]);
        let status =
            unsafe { SLSWindowSetShadowProperties(window, properties.as_concrete_TypeRef()) };
        check("SLSWindowSetShadowProperties", window, status);
    }

    fn set_window_level(&self, window: WindowId, level: i32) {
        let status = unsafe { SLSSetWindowLevel(self.cid, window, level) };
        check("SLSSetWindowLevel", window, status);
    }

    fn order_window(&self, window: WindowId, order: WindowOrder) {
        let (mode, relative_to) = order_mode(order);
        let status = unsafe { SLSOrderWindow(self.cid, window, mode, relative_to) };
        check("SLSOrderWindow", window, status);
    }

    fn disable_update(&self) {
        check("SLSDisableUpdate", 0, unsafe { SLSDisableUpdate(self.cid) });
    }

    fn reenable_update(&self) {
        check("SLSReenableUpdate", 0, unsafe { SLSReenableUpdate(self.cid) });
    }

    fn add_tracking_rect(&self, window: WindowId, rect: Rect) {
        let status = unsafe { SLSAddTrackingRect(self.cid, window, cg_rect(rect)) };
        check("SLSAddTrackingRect", window, status);
    }

    fn remove_all_tracking_areas(&self, window: WindowId) {
        let status = unsafe { SLSRemoveAllTrackingAreas(self.cid, window) };
        check("SLSRemoveAllTrackingAreas", window, status);
    }

    fn create_canvas(&self, window: WindowId) -> SkyLightCanvas {
        let ctx = unsafe { SLWindowContextCreate(self.cid, window, ptr::null()) };
        if ctx.is_null() {
            tracing::warn!(window, "skylight: failed to create window context");
        }
        SkyLightCanvas { ctx }
    }
}

// ============================================================================
// Displays and Spaces
// ============================================================================

/// Live display, menu bar and space state.
#[derive(Debug, Clone, Copy)]
pub struct SkyLightDisplays {
    cid: u32,
}

impl SkyLightDisplays {
    /// Creates a view over the displays of `compositor`'s connection.
    #[must_use]
    pub const fn new(compositor: &SkyLight) -> Self { Self { cid: compositor.cid } }

    /// Ids of every active display, main display first.
    #[must_use]
    pub fn active_display_ids() -> Vec<u32> {
        match CGDisplay::active_displays() {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => vec![CGDisplay::main().id],
            Err(err) => {
                tracing::warn!(error = err, "skylight: failed to list displays");
                vec![CGDisplay::main().id]
            }
        }
    }
}

impl DisplayGeometry for SkyLightDisplays {
    fn bounds(&self, display_id: u32) -> Rect { from_cg_rect(&CGDisplay::new(display_id).bounds()) }

    fn menu_bar_visible(&self) -> bool {
        let mut autohide: i32 = 0;
        let status = unsafe { SLSGetMenuBarAutohideEnabled(self.cid, &raw mut autohide) };
        check("SLSGetMenuBarAutohideEnabled", 0, status);
        if autohide == 0 {
            return true;
        }

        // Auto-hidden menu bars may still be revealed right now.
        unsafe {
            let Some(class) = Class::get("NSMenu") else {
                return false;
            };
            let visible: BOOL = msg_send![class, menuBarVisible];
            visible != NO
        }
    }

    fn menu_bar_rect(&self, display_id: u32) -> Rect {
        let mut rect = CGRect::new(&CGPoint::new(0.0, 0.0), &CGSize::new(0.0, 0.0));
        let status = unsafe { SLSGetRevealedMenuBarBounds(&raw mut rect, self.cid, display_id) };
        check("SLSGetRevealedMenuBarBounds", 0, status);
        from_cg_rect(&rect)
    }
}

impl SpaceResolver for SkyLightDisplays {
    fn space_id_for_display(&self, display_id: u32) -> u32 {
        let Some(uuid) = display_uuid(display_id) else {
            return 0;
        };
        let current = unsafe { SLSManagedDisplayGetCurrentSpace(self.cid, uuid.as_concrete_TypeRef()) };
        let is_main = CGDisplay::main().id == display_id;

        let displays = unsafe { SLSCopyManagedDisplaySpaces(self.cid) };
        if displays.is_null() {
            return 0;
        }
        let index = unsafe { mission_control_index(displays, &uuid, is_main, current) };
        unsafe { CFRelease(displays.cast()) };
        index
    }
}

fn display_uuid(display_id: u32) -> Option<CFString> {
    unsafe {
        let uuid = CGDisplayCreateUUIDFromDisplayID(display_id);
        if uuid.is_null() {
            return None;
        }
        let string = CFUUIDCreateString(ptr::null(), uuid);
        CFRelease(uuid);
        if string.is_null() {
            return None;
        }
        Some(CFString::wrap_under_create_rule(string))
    }
}

/// Mission-control index of `space` counted across every display, 0 if absent.
///
/// # Safety
///
/// `displays` must be the array returned by `SLSCopyManagedDisplaySpaces`.
unsafe fn mission_control_index(
    displays: CFArrayRef,
    uuid: &CFString,
    is_main: bool,
    space: u64,
) -> u32 {
    let identifier_key = CFString::from_static_string("Display Identifier");
    let spaces_key = CFString::from_static_string("Spaces");
    let id_key = CFString::from_static_string("id64");
    let main = CFString::from_static_string("Main");

    let mut index: u32 = 0;
    unsafe {
        for i in 0..CFArrayGetCount(displays) {
            let display: CFDictionaryRef = CFArrayGetValueAtIndex(displays, i).cast();
            let identifier =
                CFDictionaryGetValue(display, identifier_key.as_concrete_TypeRef().cast());
            let spaces: CFArrayRef =
                CFDictionaryGetValue(display, spaces_key.as_concrete_TypeRef().cast()).cast();
            if spaces.is_null() {
                continue;
            }

            let matches = !identifier.is_null()
                && (CFEqual(identifier, uuid.as_CFTypeRef()) != 0
                    || (is_main && CFEqual(identifier, main.as_CFTypeRef()) != 0));

            for j in 0..CFArrayGetCount(spaces) {
                index += 1;
                if !matches {
                    continue;
                }
                let entry: CFDictionaryRef = CFArrayGetValueAtIndex(spaces, j).cast();
                let number: CFNumberRef =
                    CFDictionaryGetValue(entry, id_key.as_concrete_TypeRef().cast()).cast();
                if number.is_null() {
                    continue;
                }
                let mut id: i64 = 0;
                CFNumberGetValue(number, kCFNumberSInt64Type, (&raw mut id).cast());
                if u64::try_from(id).is_ok_and(|id| id == space) {
                    return index;
                }
            }
        }
    }
    0
}

// ============================================================================
// Entry Point
// ============================================================================

/// Creates one bar per active display and runs the main run loop.
///
/// # Errors
///
/// Returns `RibbonError::PlatformError` if the window server is unreachable
/// or a display index does not fit.
pub fn run_bars(config: &RibbonConfig) -> Result<(), RibbonError> {
    let compositor = Rc::new(SkyLight::connect()?);
    let displays = SkyLightDisplays::new(&compositor);
    let mut manager = BarManager::from_config(config);

    let mut bars = Vec::new();
    for (i, display_id) in SkyLightDisplays::active_display_ids().into_iter().enumerate() {
        let display_index = u32::try_from(i + 1)
            .map_err(|_| RibbonError::PlatformError(format!("too many displays: {i}")))?;
        let bar = Bar::create(
            Rc::clone(&compositor),
            display_id,
            display_index,
            &manager,
            &displays,
            &displays,
        );
        bars.push(bar);
    }

    for bar in &mut bars {
        bar.redraw(&mut manager);
    }
    tracing::info!(bars = bars.len(), "bars running");

    CFRunLoop::run_current();

    for bar in bars {
        bar.destroy(&mut manager);
    }
    Ok(())
}
