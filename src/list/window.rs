//! Window Cache
//!
//! The sparse index→item mapping behind a lazily paginated list. A
//! contiguous region starting at index 0 is loaded; indices beyond it are
//! unknown until fetched. A derived id→index reverse map targets in-place
//! patches by id; it is rebuilt synchronously after every window mutation
//! and is never consumed stale.

use crate::domain::{ItemId, ListItem};
use crate::list::projection::RenderProjection;
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Sparse window over a remote collection
#[derive(Debug, Default)]
pub struct WindowCache {
    /// Loaded items keyed by collection index
    items: BTreeMap<usize, ListItem>,
    /// Derived reverse map: item id → current index
    index_by_id: AHashMap<ItemId, usize>,
    /// Authoritative size of the queried set, from the last page fetch;
    /// unknown until the first fetch completes
    total_count: Option<usize>,
}

impl WindowCache {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one fetched page into the window
    ///
    /// Items land at `from`, `from + 1`, ... in fetch order. `total_count`
    /// is the authoritative set size reported alongside the page.
    pub fn merge_page(&mut self, from: usize, items: Vec<ListItem>, total_count: usize) {
        for (offset, item) in items.into_iter().enumerate() {
            self.items.insert(from + offset, item);
        }
        self.total_count = Some(total_count);
        self.rebuild_index();
    }

    /// Replace already-loaded items in place, keyed by id
    ///
    /// Each replacement lands at the id's current index; ids not present in
    /// the reverse map are ignored. Indices never move, so the reverse map
    /// stays valid without a rebuild.
    pub fn apply_replacements(&mut self, replacements: Vec<ListItem>) {
        for item in replacements {
            if let Some(&index) = self.index_by_id.get(&item.id) {
                self.items.insert(index, item);
            }
        }
    }

    /// Drop all loaded items and the reverse map
    ///
    /// The total count is kept; the next page fetch refreshes it.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index_by_id.clear();
    }

    /// Number of loaded entries
    pub fn loaded_count(&self) -> usize {
        self.items.len()
    }

    /// Authoritative size of the queried set; 0 until the first fetch
    pub fn total_count(&self) -> usize {
        self.total_count.unwrap_or(0)
    }

    /// Whether every item of the set is loaded
    ///
    /// False while the total is still unknown, so the first load is never
    /// suppressed by a vacuous `0 >= 0`.
    pub fn all_loaded(&self) -> bool {
        self.total_count.is_some_and(|total| self.items.len() >= total)
    }

    /// Whether an item with this id is currently loaded
    pub fn contains_id(&self, id: &ItemId) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Current index of a loaded item
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Get a loaded item by index
    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(&index)
    }

    /// Read-only view of the loaded items in ascending index order
    pub fn projection(&self) -> RenderProjection {
        RenderProjection::new(
            self.items
                .iter()
                .map(|(&index, item)| (index, item.clone()))
                .collect(),
        )
    }

    fn rebuild_index(&mut self) {
        self.index_by_id.clear();
        for (&index, item) in &self.items {
            self.index_by_id.insert(item.id.clone(), index);
        }
    }
}
