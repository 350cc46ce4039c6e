//! Per-bar item visibility.

use crate::items::{ItemKind, ItemLayout};

/// What a bar matches item association masks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFilter {
    /// The bar's association index.
    pub display_index: u32,
    /// Mission-control index of the bar's active space.
    pub space_index: u32,
}

impl VisibilityFilter {
    /// Returns whether the bar draws an item with these properties.
    ///
    /// A zero mask never restricts. Space indicators ignore the space mask so
    /// that every space keeps its indicator.
    #[must_use]
    pub const fn should_draw(&self, layout: &ItemLayout) -> bool {
        if !layout.drawing {
            return false;
        }

        if layout.associated_display_mask != 0
            && !has_bit(layout.associated_display_mask, self.display_index)
        {
            return false;
        }

        if layout.associated_space_mask != 0
            && !has_bit(layout.associated_space_mask, self.space_index)
            && !matches!(layout.kind, ItemKind::Space)
        {
            return false;
        }

        true
    }
}

/// Bit `index` of `mask`; indices past the mask width are never set.
const fn has_bit(mask: u32, index: u32) -> bool {
    match 1u32.checked_shl(index) {
        Some(bit) => mask & bit != 0,
        None => false,
    }
}
