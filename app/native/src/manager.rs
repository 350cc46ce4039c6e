//! Shared state read by every bar.

use crate::association::AssociationTable;
use crate::config::{BarStyle, RibbonConfig};
use crate::items::{BarItem, FixedItem, ItemId, ItemRegistry};

/// Style, items and item-to-bar associations shared by all bars.
///
/// Bars receive the manager on every operation instead of reaching for a
/// global; the style is only read, the registry is iterated in order and
/// the association table is rewritten row by row by the draw passes.
#[derive(Debug, Default)]
pub struct BarManager {
    /// Global bar style.
    pub style: BarStyle,
    /// Ordered items shared by every bar.
    pub items: ItemRegistry,
    /// Which items each bar currently shows.
    pub associations: AssociationTable,
}

impl BarManager {
    /// Creates a manager with no items.
    #[must_use]
    pub fn new(style: BarStyle) -> Self {
        Self {
            style,
            items: ItemRegistry::new(),
            associations: AssociationTable::new(),
        }
    }

    /// Creates a manager populated from the configuration.
    #[must_use]
    pub fn from_config(config: &RibbonConfig) -> Self {
        let mut manager = Self::new(config.bar.clone());
        for item in &config.items {
            manager.add_item(Box::new(FixedItem::from_config(item)));
        }
        tracing::debug!(items = manager.items.len(), "bar manager initialized");
        manager
    }

    /// Appends an item to the registry.
    pub fn add_item(&mut self, item: Box<dyn BarItem>) -> ItemId { self.items.push(item) }

    /// Removes an item from the registry and from every bar's associations.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Box<dyn BarItem>> {
        self.associations.remove_item(id);
        self.items.remove(id)
    }
}
