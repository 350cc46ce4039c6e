//! Which items are currently shown on which bar.
//!
//! An item can be visible on some bars and hidden on others at the same
//! time. Each draw pass of a bar opens an [`AssociationPass`], confirms the
//! items it draws, and commits: the bar's whole row is replaced at once, so
//! a pass only ever touches its own bar and an item skipped by the pass is
//! revoked without a separate reconciliation step.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;

use crate::items::ItemId;

/// Inline capacity for items confirmed during one pass.
const CONFIRMED_INLINE_CAP: usize = 32;

/// Mapping from (item, bar display index) to "currently shown".
#[derive(Debug, Default)]
pub struct AssociationTable {
    rows: HashMap<u32, HashSet<ItemId>>,
}

impl AssociationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Starts a draw pass for the bar at `display_index`.
    pub fn begin(&mut self, display_index: u32) -> AssociationPass<'_> {
        AssociationPass { table: self, display_index, confirmed: SmallVec::new() }
    }

    /// Whether the item was shown on the bar by its last committed pass.
    #[must_use]
    pub fn is_shown(&self, item: ItemId, display_index: u32) -> bool {
        self.rows.get(&display_index).is_some_and(|row| row.contains(&item))
    }

    /// Display indices of the bars currently showing the item, ascending.
    #[must_use]
    pub fn bars_showing(&self, item: ItemId) -> Vec<u32> {
        let mut bars: Vec<u32> = self
            .rows
            .iter()
            .filter(|(_, row)| row.contains(&item))
            .map(|(display_index, _)| *display_index)
            .collect();
        bars.sort_unstable();
        bars
    }

    /// Forgets an item on every bar.
    pub fn remove_item(&mut self, item: ItemId) {
        for row in self.rows.values_mut() {
            row.remove(&item);
        }
    }

    /// Forgets every association of a bar.
    pub fn remove_bar(&mut self, display_index: u32) { self.rows.remove(&display_index); }
}

/// Associations collected by one draw pass.
///
/// Nothing is written to the table until [`commit`](Self::commit); a pass
/// dropped without committing leaves the previous state in place.
#[derive(Debug)]
pub struct AssociationPass<'a> {
    table: &'a mut AssociationTable,
    display_index: u32,
    confirmed: SmallVec<[ItemId; CONFIRMED_INLINE_CAP]>,
}

impl AssociationPass<'_> {
    /// Marks an item as drawn by this pass.
    pub fn confirm(&mut self, item: ItemId) { self.confirmed.push(item); }

    /// Replaces the bar's row with the confirmed items.
    pub fn commit(self) {
        let row: HashSet<ItemId> = self.confirmed.into_iter().collect();
        tracing::trace!(display_index = self.display_index, shown = row.len(), "associations committed");
        self.table.rows.insert(self.display_index, row);
    }
}
