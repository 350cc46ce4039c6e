//! Multi-display bar lifecycle on the headless backend.
//!
//! These tests drive bars through the public API only: build a manager from
//! a configuration, create one bar per display, redraw, hide, resize and
//! destroy, then inspect what the compositor was asked to do.

use std::rc::Rc;

use ribbon_lib::config::parse_config;
use ribbon_lib::geometry::Rect;
use ribbon_lib::items::ItemId;
use ribbon_lib::platform::{SpaceResolver, WindowOrder};
use ribbon_lib::platform::headless::{CompositorCall, HeadlessCompositor, HeadlessDisplays};
use ribbon_lib::{Bar, BarManager};

const CONFIG: &str = r#"{
    // shared by both bars
    "items": [
        { "name": "apps", "length": 40 },
        { "name": "clock", "position": "right", "length": 60 },
        { "name": "battery", "position": "right", "length": 30, "displays": [2] },
        { "name": "spaces", "position": "center", "length": 20, "spaces": [3], "spaceIndicator": true },
        { "name": "music", "length": 50, "spaces": [2], "hover": true }
    ]
}"#;

struct Desk {
    compositor: Rc<HeadlessCompositor>,
    displays: HeadlessDisplays,
    manager: BarManager,
    bars: Vec<Bar<HeadlessCompositor>>,
}

fn desk() -> Desk {
    let config = parse_config(CONFIG).unwrap();
    let compositor = Rc::new(HeadlessCompositor::new());
    let displays = HeadlessDisplays::new()
        .with_display(10, Rect::new(0.0, 0.0, 1440.0, 900.0), 1)
        .with_display(20, Rect::new(1440.0, 0.0, 1920.0, 1080.0), 2);
    let mut manager = BarManager::from_config(&config);

    let mut bars: Vec<_> = [10, 20]
        .into_iter()
        .zip(1..)
        .map(|(display_id, display_index)| {
            Bar::create(
                Rc::clone(&compositor),
                display_id,
                display_index,
                &manager,
                &displays,
                &displays,
            )
        })
        .collect();

    for bar in &mut bars {
        bar.redraw(&mut manager);
    }

    Desk { compositor, displays, manager, bars }
}

fn id(manager: &BarManager, name: &str) -> ItemId {
    manager
        .items
        .iter()
        .find(|(_, item)| item.name() == name)
        .map(|(id, _)| id)
        .unwrap()
}

fn xs(bar: &Bar<HeadlessCompositor>, manager: &BarManager) -> Vec<(String, f64)> {
    bar.placements()
        .iter()
        .map(|placement| {
            let name = manager.items.get(placement.item).unwrap().name().to_string();
            (name, placement.x)
        })
        .collect()
}

#[test]
fn each_display_gets_its_own_layout() {
    let desk = desk();

    assert_eq!(
        xs(&desk.bars[0], &desk.manager),
        vec![("apps".to_string(), 0.0), ("clock".to_string(), 1380.0), ("spaces".to_string(), 710.0)]
    );
    assert_eq!(
        xs(&desk.bars[1], &desk.manager),
        vec![
            ("apps".to_string(), 0.0),
            ("clock".to_string(), 1860.0),
            ("battery".to_string(), 1830.0),
            ("spaces".to_string(), 950.0),
            ("music".to_string(), 40.0),
        ]
    );
    assert_eq!(desk.bars[1].origin().x, 1440.0);
}

#[test]
fn associations_track_every_bar() {
    let desk = desk();
    let associations = &desk.manager.associations;

    assert_eq!(associations.bars_showing(id(&desk.manager, "apps")), vec![1, 2]);
    assert_eq!(associations.bars_showing(id(&desk.manager, "battery")), vec![2]);
    assert_eq!(associations.bars_showing(id(&desk.manager, "music")), vec![2]);
    assert_eq!(associations.bars_showing(id(&desk.manager, "spaces")), vec![1, 2]);
}

#[test]
fn space_change_revokes_only_that_bar() {
    let mut desk = desk();
    let music = id(&desk.manager, "music");

    desk.displays.set_space(20, 1);
    desk.bars[1].set_space(desk.displays.space_id_for_display(20));
    desk.bars[1].redraw(&mut desk.manager);

    assert!(desk.manager.associations.bars_showing(music).is_empty());
    assert!(desk.manager.associations.is_shown(id(&desk.manager, "apps"), 1));
}

#[test]
fn hover_items_are_tracked_inside_their_bounds() {
    let desk = desk();
    let window = desk.bars[1].window_id().unwrap();

    // music sits at x = 40 with length 50 and the bar is 32 high
    let tracking = desk.compositor.tracking_rects(window);
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0].x, 41.0);
    assert_eq!(tracking[0].width, 48.0);

    assert!(desk.compositor.tracking_rects(desk.bars[0].window_id().unwrap()).is_empty());
}

#[test]
fn every_redraw_is_fenced() {
    let mut desk = desk();
    let window = desk.bars[0].window_id().unwrap();
    desk.compositor.clear_calls();

    desk.bars[0].redraw(&mut desk.manager);
    let calls = desk.compositor.calls();

    assert_eq!(calls.first(), Some(&CompositorCall::DisableUpdate));
    assert_eq!(calls[1], CompositorCall::OrderWindow(window, WindowOrder::Below { relative_to: 0 }));
    assert_eq!(calls.last(), Some(&CompositorCall::ReenableUpdate));
    assert_eq!(
        calls[calls.len() - 2],
        CompositorCall::OrderWindow(window, WindowOrder::Above { relative_to: window })
    );
    assert_eq!(desk.compositor.update_depth(), 0);
}

#[test]
fn hidden_bar_keeps_its_last_associations() {
    let mut desk = desk();
    let style = desk.manager.style.clone();
    let apps = id(&desk.manager, "apps");

    desk.bars[0].set_hidden(true, &style, &desk.displays);
    desk.compositor.clear_calls();
    desk.bars[0].redraw(&mut desk.manager);
    desk.bars[0].resize(&mut desk.manager, &desk.displays);

    assert!(desk.compositor.calls().is_empty());
    assert!(desk.manager.associations.is_shown(apps, 1));
    assert_eq!(desk.compositor.live_windows().len(), 1);

    desk.bars[0].set_hidden(false, &style, &desk.displays);
    assert_eq!(desk.compositor.live_windows().len(), 2);
}

#[test]
fn removed_items_disappear_from_every_bar() {
    let mut desk = desk();
    let clock = id(&desk.manager, "clock");

    assert!(desk.manager.remove_item(clock).is_some());
    assert!(desk.manager.associations.bars_showing(clock).is_empty());

    for bar in &mut desk.bars {
        bar.redraw(&mut desk.manager);
    }
    // battery now takes the rightmost slot on the second bar
    let battery = desk.bars[1]
        .placements()
        .iter()
        .find(|placement| placement.item == id(&desk.manager, "battery"))
        .unwrap();
    assert_eq!(battery.x, 1890.0);
}

#[test]
fn destroying_bars_releases_everything() {
    let Desk { compositor, mut manager, bars, .. } = desk();
    let apps = id(&manager, "apps");

    for bar in bars {
        bar.destroy(&mut manager);
    }

    assert!(compositor.live_windows().is_empty());
    assert!(compositor.live_canvases().is_empty());
    assert_eq!(compositor.invalid_releases(), 0);
    assert!(manager.associations.bars_showing(apps).is_empty());
}
