//! Layout preview on the headless backend.

use std::rc::Rc;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::bar::{Bar, BarFrame};
use crate::cli::output;
use crate::config::{self, RibbonConfig};
use crate::error::RibbonError;
use crate::geometry::Rect;
use crate::items::{ItemId, Position};
use crate::manager::BarManager;
use crate::platform::headless::{HeadlessCompositor, HeadlessDisplays};

/// Display id of the simulated display.
const PREVIEW_DISPLAY_ID: u32 = 1;

/// Menu bar height used with `--menu-bar`.
const PREVIEW_MENU_BAR_HEIGHT: f64 = 25.0;

/// Longest item name shown in the table.
const NAME_COLUMN_WIDTH: usize = 24;

/// Arguments of `ribbon layout`.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Width of the simulated display.
    #[arg(long, default_value_t = 1440.0)]
    pub width: f64,

    /// Height of the simulated display.
    #[arg(long, default_value_t = 900.0)]
    pub height: f64,

    /// Association index (1-based) of the simulated bar.
    #[arg(long, default_value_t = 1)]
    pub display_index: u32,

    /// Mission-control index of the active space; 0 means unknown.
    #[arg(long, default_value_t = 1)]
    pub space: u32,

    /// Simulate a visible menu bar above the bar.
    #[arg(long)]
    pub menu_bar: bool,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
            display_index: 1,
            space: 1,
            menu_bar: false,
            json: false,
        }
    }
}

/// An item placed by the preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    /// Registry id.
    pub id: ItemId,
    /// Configured name.
    pub name: String,
    /// Region of the item.
    pub position: Position,
    /// Anchor in bar coordinates.
    pub x: f64,
    /// Length the item reported.
    pub length: u32,
    /// Bounding rect in bar coordinates.
    pub bounds: Rect,
    /// Whether the item was laid out right to left.
    pub right_to_left: bool,
}

/// Result of a layout preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    /// Bar frame and origin.
    pub bar: BarFrame,
    /// Association index of the bar.
    pub display_index: u32,
    /// Active space of the bar.
    pub space: u32,
    /// Placed items, in registry order.
    pub items: Vec<PlacedItem>,
}

/// Builds a headless bar from `config`, draws it once and reports the placements.
///
/// # Errors
///
/// Returns `RibbonError::InvalidArguments` for non-positive display sizes or
/// a zero display index.
pub fn preview(config: &RibbonConfig, args: &LayoutArgs) -> Result<LayoutReport, RibbonError> {
    if !(args.width > 0.0 && args.height > 0.0) {
        return Err(RibbonError::InvalidArguments(format!(
            "display size must be positive, got {}x{}",
            args.width, args.height
        )));
    }
    if args.display_index == 0 {
        return Err(RibbonError::InvalidArguments(
            "display index is 1-based".to_string(),
        ));
    }

    let compositor = Rc::new(HeadlessCompositor::new());
    let mut displays = HeadlessDisplays::new().with_display(
        PREVIEW_DISPLAY_ID,
        Rect::with_size(args.width, args.height),
        args.space,
    );
    if args.menu_bar {
        displays = displays.with_menu_bar(PREVIEW_MENU_BAR_HEIGHT);
    }

    let mut manager = BarManager::from_config(config);
    let mut bar = Bar::create(
        compositor,
        PREVIEW_DISPLAY_ID,
        args.display_index,
        &manager,
        &displays,
        &displays,
    );
    bar.redraw(&mut manager);

    let items = bar
        .placements()
        .iter()
        .filter_map(|placement| {
            let item = manager.items.get(placement.item)?;
            Some(PlacedItem {
                id: placement.item,
                name: item.name().to_string(),
                position: placement.position,
                x: placement.x,
                length: placement.length,
                bounds: item.bounding_rect(),
                right_to_left: placement.right_to_left,
            })
        })
        .collect();

    let report = LayoutReport {
        bar: BarFrame { frame: bar.frame(), origin: bar.origin() },
        display_index: bar.display_index(),
        space: bar.space_id(),
        items,
    };

    bar.destroy(&mut manager);
    Ok(report)
}

/// Execute `ribbon layout`.
///
/// # Errors
///
/// Returns an error if the arguments are invalid.
pub fn execute(args: &LayoutArgs) -> Result<(), RibbonError> {
    let report = preview(config::get_config(), args)?;

    if args.json {
        output::print_highlighted_json(&serde_json::to_value(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn print_report(report: &LayoutReport) {
    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: u32,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Position")]
        position: String,
        #[tabled(rename = "X")]
        x: i64,
        #[tabled(rename = "Length")]
        length: u32,
        #[tabled(rename = "Bounds")]
        bounds: String,
        #[tabled(rename = "RTL")]
        right_to_left: String,
    }

    let frame = report.bar.frame;
    let origin = report.bar.origin;
    println!(
        "{} {}x{} at ({}, {}), display index {}, space {}",
        "Bar".bold(),
        frame.width,
        frame.height,
        origin.x,
        origin.y,
        report.display_index,
        report.space
    );

    if report.items.is_empty() {
        println!("{}", "No items placed.".dimmed());
        return;
    }

    let rows: Vec<ItemRow> = report
        .items
        .iter()
        .map(|item| {
            let bounds = item.bounds;
            ItemRow {
                id: item.id.get(),
                name: output::truncate(&item.name, NAME_COLUMN_WIDTH),
                position: format!("{:?}", item.position).to_lowercase(),
                x: item.x as i64,
                length: item.length,
                bounds: format!(
                    "{}, {} {}x{}",
                    bounds.x, bounds.y, bounds.width, bounds.height
                ),
                right_to_left: output::format_bool(item.right_to_left),
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Items ({})", report.items.len()).bold());
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemConfig;

    fn item(name: &str, position: Position, length: u32) -> ItemConfig {
        ItemConfig {
            name: name.to_string(),
            position,
            length,
            ..ItemConfig::default()
        }
    }

    fn config() -> RibbonConfig {
        let mut config = RibbonConfig::default();
        config.bar.background.padding_left = 10;
        config.bar.background.padding_right = 10;
        config.items = vec![
            item("apple", Position::Left, 50),
            item("clock", Position::Right, 80),
            item("battery", Position::Right, 40),
        ];
        config
    }

    #[test]
    fn preview_places_items() {
        let args = LayoutArgs { width: 1000.0, ..LayoutArgs::default() };
        let report = preview(&config(), &args).unwrap();

        let xs: Vec<(String, f64)> =
            report.items.iter().map(|item| (item.name.clone(), item.x)).collect();
        assert_eq!(
            xs,
            vec![
                ("apple".to_string(), 10.0),
                ("clock".to_string(), 910.0),
                ("battery".to_string(), 870.0),
            ]
        );
        assert!((report.bar.frame.width - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn preview_respects_display_masks() {
        let mut config = config();
        config.items[0].displays = vec![2];

        let first = preview(&config, &LayoutArgs::default()).unwrap();
        let second =
            preview(&config, &LayoutArgs { display_index: 2, ..LayoutArgs::default() }).unwrap();

        assert_eq!(first.items.len(), 2);
        assert_eq!(second.items.len(), 3);
    }

    #[test]
    fn preview_without_space_places_nothing() {
        let report = preview(&config(), &LayoutArgs { space: 0, ..LayoutArgs::default() }).unwrap();
        assert!(report.items.is_empty());
    }

    #[test]
    fn preview_below_menu_bar() {
        let report =
            preview(&config(), &LayoutArgs { menu_bar: true, ..LayoutArgs::default() }).unwrap();
        assert!((report.bar.origin.y - PREVIEW_MENU_BAR_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn preview_rejects_invalid_arguments() {
        let zero_width = preview(&config(), &LayoutArgs { width: 0.0, ..LayoutArgs::default() });
        assert!(matches!(zero_width, Err(RibbonError::InvalidArguments(_))));

        let zero_index =
            preview(&config(), &LayoutArgs { display_index: 0, ..LayoutArgs::default() });
        assert!(matches!(zero_index, Err(RibbonError::InvalidArguments(_))));
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = preview(&config(), &LayoutArgs::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["displayIndex"], 1);
        assert_eq!(json["items"][0]["name"], "apple");
        assert_eq!(json["items"][1]["rightToLeft"], true);
    }
}
