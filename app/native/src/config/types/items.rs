//! Item configuration types.
//!
//! The configuration describes fixed-length items. Each entry becomes one
//! registry item, in file order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::color::Rgba;
use crate::items::Position;

/// A single bar item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemConfig {
    /// Name of the item, used in logs and in `ribbon layout` output.
    pub name: String,

    /// Region of the bar the item is placed in.
    /// Default: "left"
    pub position: Position,

    /// Whether the item is drawn at all.
    /// Default: true
    pub drawing: bool,

    /// Bar display indices (1-based) the item is restricted to.
    /// An empty list shows the item on every bar.
    pub displays: Vec<u32>,

    /// Space indices (1-based, mission-control order) the item is restricted to.
    /// An empty list shows the item on every space.
    pub spaces: Vec<u32>,

    /// Marks the item as a space indicator. Space indicators ignore `spaces`
    /// so that indicators for inactive spaces stay visible.
    /// Default: false
    pub space_indicator: bool,

    /// Natural content length of the item in points.
    /// Default: 0
    pub length: u32,

    /// Constant width overriding the natural length when set.
    pub width: Option<u32>,

    /// Space reserved before the item.
    /// Default: 0
    pub padding_left: u32,

    /// Space reserved after the item.
    /// Default: 0
    pub padding_right: u32,

    /// Whether the item wants mouse entered / exited notifications.
    /// Default: false
    pub hover: bool,

    /// Fill color of the item background.
    /// Default: transparent
    pub color: Rgba,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Position::Left,
            drawing: true,
            displays: Vec::new(),
            spaces: Vec::new(),
            space_indicator: false,
            length: 0,
            width: None,
            padding_left: 0,
            padding_right: 0,
            hover: false,
            color: Rgba::TRANSPARENT,
        }
    }
}

/// Builds an association bitmask from a list of indices.
///
/// Indices that do not fit into the mask are dropped with a warning.
#[must_use]
pub fn mask_from_indices(indices: &[u32]) -> u32 {
    indices.iter().fold(0, |mask, &index| {
        1u32.checked_shl(index).map_or_else(
            || {
                tracing::warn!(index, "association index out of range, ignoring");
                mask
            },
            |bit| mask | bit,
        )
    })
}
