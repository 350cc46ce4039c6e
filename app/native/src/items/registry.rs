//! Ordered registry of bar items.

use std::fmt;

use serde::Serialize;

use super::BarItem;

/// Stable identifier of a registry item.
///
/// Identifiers are never reused, so stale ids held by other tables simply
/// stop matching once the item is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

struct Entry {
    id: ItemId,
    item: Box<dyn BarItem>,
}

/// The ordered item sequence shared by every bar.
///
/// Registry order is layout order: left and center items fill left to
/// right, right items fill right to left.
#[derive(Default)]
pub struct ItemRegistry {
    entries: Vec<Entry>,
    next_id: u32,
}

impl fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Appends an item and returns its id.
    pub fn push(&mut self, item: Box<dyn BarItem>) -> ItemId {
        let id = self.allocate_id();
        self.entries.push(Entry { id, item });
        id
    }

    /// Removes an item, returning it if it was present.
    pub fn remove(&mut self, id: ItemId) -> Option<Box<dyn BarItem>> {
        let index = self.index_of(id)?;
        Some(self.entries.remove(index).item)
    }

    /// Returns the registry position of an item.
    #[must_use]
    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Returns an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&dyn BarItem> {
        self.entries.iter().find(|entry| entry.id == id).map(|entry| entry.item.as_ref())
    }

    /// Returns an item by id, mutably.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut (dyn BarItem + 'static)> {
        self.entries.iter_mut().find(|entry| entry.id == id).map(|entry| entry.item.as_mut())
    }

    /// Iterates items in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &dyn BarItem)> {
        self.entries.iter().map(|entry| (entry.id, entry.item.as_ref()))
    }

    /// Iterates items mutably in registry order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut (dyn BarItem + 'static))> {
        self.entries.iter_mut().map(|entry| (entry.id, entry.item.as_mut()))
    }

    /// Iterates item ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ { self.entries.iter().map(|entry| entry.id) }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{FixedItem, ItemLayout};

    fn item(length: u32) -> Box<dyn BarItem> {
        Box::new(FixedItem::new("test", ItemLayout::default(), length))
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut registry = ItemRegistry::new();
        let a = registry.push(item(1));
        let b = registry.push(item(2));

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut registry = ItemRegistry::new();
        let a = registry.push(item(1));
        assert!(registry.remove(a).is_some());
        let b = registry.push(item(2));

        assert_ne!(a, b);
        assert!(registry.get(a).is_none());
        assert!(registry.remove(a).is_none());
    }

    #[test]
    fn get_mut_reaches_item() {
        let mut registry = ItemRegistry::new();
        let a = registry.push(item(42));

        let length = registry.get_mut(a).map(|item| item.measure_length(true));
        assert_eq!(length, Some(42));
    }
}
