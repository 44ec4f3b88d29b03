//! Item Source
//!
//! Contracts for the remote item store. The list core is transport-agnostic:
//! the full client talks REST, tests and the demo use an in-memory source.

use crate::domain::{ItemId, ListItem};
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex};

/// One page of a remote collection
#[derive(Clone, Debug)]
pub struct ItemPage {
    /// Items of the requested range, in collection order
    pub items: Vec<ListItem>,
    /// Authoritative size of the whole queried set
    ///
    /// May change between fetches as items are created or deleted; a reset
    /// is the only way to re-anchor index positions after that.
    pub total_count: usize,
}

/// Access to the remote item collection
///
/// `fetch_page` must be idempotent for repeated identical ranges absent
/// external changes. `fetch_by_ids` is not required to preserve input order;
/// callers reconcile by id.
#[allow(async_fn_in_trait)]
pub trait ItemSource {
    /// Fetch the items of the half-open index range `[from, to)`
    async fn fetch_page(&self, from: usize, to: usize) -> Result<ItemPage>;

    /// Fetch specific items by id
    async fn fetch_by_ids(&self, ids: &[ItemId]) -> Result<Vec<ListItem>>;
}

/// In-memory item source
///
/// Backs the demo binary and tests. Holds the full collection behind a
/// shared handle and serves pages out of it; mutating the backing data
/// between fetches simulates remote changes.
#[derive(Clone)]
pub struct InMemorySource {
    items: Arc<Mutex<Vec<ListItem>>>,
}

impl InMemorySource {
    /// Create a source over the given collection
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Replace an item in the backing collection, keyed by id
    pub fn replace(&self, item: ListItem) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = items.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
        }
    }

    /// Insert an item at the given position in the backing collection
    pub fn insert(&self, index: usize, item: ListItem) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let index = index.min(items.len());
        items.insert(index, item);
    }

    /// Remove an item from the backing collection by id
    pub fn remove(&self, id: &ItemId) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.retain(|i| &i.id != id);
    }

    /// Look up a single item by id
    pub async fn find_one(&self, id: &ItemId) -> Option<ListItem> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.iter().find(|i| &i.id == id).cloned()
    }
}

impl ItemSource for InMemorySource {
    async fn fetch_page(&self, from: usize, to: usize) -> Result<ItemPage> {
        if to <= from {
            return Err(Error::Invalid {
                message: format!("bad page range [{from}, {to})"),
            });
        }

        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let total_count = items.len();
        let page = items
            .iter()
            .skip(from)
            .take(to.saturating_sub(from))
            .cloned()
            .collect();

        tracing::debug!(from, to, total_count, "Serving page");

        Ok(ItemPage {
            items: page,
            total_count,
        })
    }

    async fn fetch_by_ids(&self, ids: &[ItemId]) -> Result<Vec<ListItem>> {
        // one lookup per id, like the client's findOne round trips
        let found = futures::future::join_all(ids.iter().map(|id| self.find_one(id))).await;
        Ok(found.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with(n: usize) -> InMemorySource {
        InMemorySource::new((0..n).map(|i| ListItem::bare(format!("item-{i}"))).collect())
    }

    #[tokio::test]
    async fn test_fetch_page_range() {
        let source = source_with(5);
        let page = source.fetch_page(2, 4).await.expect("page");

        assert_eq!(page.total_count, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id.as_str(), "item-2");
    }

    #[tokio::test]
    async fn test_fetch_page_past_end_is_short() {
        let source = source_with(5);
        let page = source.fetch_page(4, 8).await.expect("page");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_empty_range() {
        let source = source_with(5);
        assert!(source.fetch_page(3, 3).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_by_ids_filters() {
        let source = source_with(3);
        let ids = vec![ItemId::from("item-0"), ItemId::from("item-9")];
        let found = source.fetch_by_ids(&ids).await.expect("items");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "item-0");
    }
}
