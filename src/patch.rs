//! Live Patch Applier
//!
//! Turns asynchronous change notifications into either an id-addressed
//! in-place refresh or a full reset. Bursts of notifications (bulk
//! operations on the backend) are coalesced into one batch per debounce
//! window instead of one fetch round trip each.
//!
//! Whether a batch forces a reset is decided by a caller-supplied reload
//! predicate over the union of changed field names: when the active query
//! depends on any of them (filter or sort fields), membership or order may
//! have changed and a full reload is the only safe response.

use crate::config::ListConfig;
use crate::domain::{ItemId, ResourceEvent};
use crate::error::Result;
use crate::list::lazy::LazyList;
use crate::services::source::ItemSource;
use ahash::AHashSet;
use crossbeam_channel::Receiver;
use std::time::Duration;

/// What to do with one batch of notifications
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchDecision {
    /// Membership or order may have changed: discard and reload
    Reload,
    /// Refresh these items in place, preserving positions
    Refresh(AHashSet<ItemId>),
    /// Nothing to do
    Ignore,
}

/// Caller-supplied predicate: does the active query depend on any of these
/// changed fields?
pub type ReloadPredicate = Box<dyn Fn(&AHashSet<String>) -> bool + Send>;

/// Build a predicate that fires when the changed fields intersect the
/// query's filter and sort fields
pub fn fields_intersect(
    query_fields: impl IntoIterator<Item = impl Into<String>>,
) -> ReloadPredicate {
    let query_fields: AHashSet<String> = query_fields.into_iter().map(Into::into).collect();
    Box::new(move |changed| changed.iter().any(|f| query_fields.contains(f)))
}

/// Classify one batch of notifications
///
/// Unions the changed fields across the batch and asks the predicate once.
/// Created events are not special-cased here: sources report all fields of
/// a new item as affected, so a well-formed predicate fires for them.
pub fn classify_batch(
    batch: &[ResourceEvent],
    should_reload: &ReloadPredicate,
) -> PatchDecision {
    if batch.is_empty() {
        return PatchDecision::Ignore;
    }

    let changed: AHashSet<String> = batch
        .iter()
        .flat_map(|event| event.fields.iter().cloned())
        .collect();

    if should_reload(&changed) {
        PatchDecision::Reload
    } else {
        PatchDecision::Refresh(batch.iter().map(|event| event.id.clone()).collect())
    }
}

/// Debouncing collector over the notification channel
///
/// Drains whatever accumulated during one debounce window into a single
/// batch, bounded by the configured capacity.
pub struct ChangeBatcher {
    rx: Receiver<ResourceEvent>,
    debounce: Duration,
    capacity: usize,
}

impl ChangeBatcher {
    /// Create a batcher over a notification receiver
    pub fn new(rx: Receiver<ResourceEvent>, config: &ListConfig) -> Self {
        Self {
            rx,
            debounce: Duration::from_millis(config.patch_debounce_ms),
            capacity: config.patch_batch_capacity,
        }
    }

    /// Wait for the next non-empty batch
    pub async fn next_batch(&self) -> Vec<ResourceEvent> {
        loop {
            tokio::time::sleep(self.debounce).await;

            let mut batch = Vec::new();
            while let Ok(event) = self.rx.try_recv() {
                batch.push(event);
                if batch.len() >= self.capacity {
                    break;
                }
            }

            if !batch.is_empty() {
                return batch;
            }
        }
    }

    /// Drain whatever is pending right now, without waiting
    pub fn drain(&self) -> Vec<ResourceEvent> {
        let mut batch = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            batch.push(event);
            if batch.len() >= self.capacity {
                break;
            }
        }
        batch
    }
}

/// Wires the batcher, the reload predicate and a list together
pub struct LivePatcher {
    batcher: ChangeBatcher,
    should_reload: ReloadPredicate,
}

impl LivePatcher {
    /// Create a patcher over a notification receiver
    pub fn new(
        rx: Receiver<ResourceEvent>,
        config: &ListConfig,
        should_reload: ReloadPredicate,
    ) -> Self {
        Self {
            batcher: ChangeBatcher::new(rx, config),
            should_reload,
        }
    }

    /// Wait for the next batch and apply it to the list
    ///
    /// Returns the decision that was applied. A caller driving both resets
    /// and refreshes must serialize them; holding `&mut` on the list here
    /// does exactly that.
    pub async fn apply_next<S: ItemSource>(
        &mut self,
        list: &mut LazyList<S>,
    ) -> Result<PatchDecision> {
        let batch = self.batcher.next_batch().await;
        self.apply(batch, list).await
    }

    /// Drain pending notifications and apply them, without waiting
    pub async fn apply_pending<S: ItemSource>(
        &mut self,
        list: &mut LazyList<S>,
    ) -> Result<PatchDecision> {
        let batch = self.batcher.drain();
        self.apply(batch, list).await
    }

    async fn apply<S: ItemSource>(
        &mut self,
        batch: Vec<ResourceEvent>,
        list: &mut LazyList<S>,
    ) -> Result<PatchDecision> {
        let decision = classify_batch(&batch, &self.should_reload);

        match &decision {
            PatchDecision::Reload => {
                tracing::debug!(events = batch.len(), "Batch touches query fields, reloading");
                list.reset().await?;
            }
            PatchDecision::Refresh(ids) => {
                tracing::debug!(events = batch.len(), ids = ids.len(), "Refreshing in place");
                list.update_items(ids).await?;
            }
            PatchDecision::Ignore => {}
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListItem;
    use crate::services::notification::ChangeFeed;
    use crate::services::source::InMemorySource;

    fn config() -> ListConfig {
        ListConfig {
            page_size: 10,
            patch_debounce_ms: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_refresh_when_fields_unrelated() {
        let predicate = fields_intersect(["state", "priority"]);
        let batch = vec![ResourceEvent::updated("b", ["headline"])];

        let decision = classify_batch(&batch, &predicate);
        match decision {
            PatchDecision::Refresh(ids) => assert!(ids.contains(&"b".into())),
            other => panic!("expected Refresh, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_reload_when_query_field_touched() {
        let predicate = fields_intersect(["state"]);
        let batch = vec![
            ResourceEvent::updated("a", ["headline"]),
            ResourceEvent::updated("b", ["state"]),
        ];

        // one relevant event forces a reload for the whole batch
        assert_eq!(classify_batch(&batch, &predicate), PatchDecision::Reload);
    }

    #[test]
    fn test_classify_empty_batch_is_ignored() {
        let predicate = fields_intersect(["state"]);
        assert_eq!(classify_batch(&[], &predicate), PatchDecision::Ignore);
    }

    #[tokio::test]
    async fn test_batcher_coalesces_burst() {
        let feed = ChangeFeed::new();
        let batcher = ChangeBatcher::new(feed.subscribe(), &config());

        for i in 0..5 {
            feed.publish(ResourceEvent::updated(format!("item-{i}"), ["headline"]))
                .expect("publish");
        }

        let batch = batcher.next_batch().await;
        assert_eq!(batch.len(), 5);
    }

    #[tokio::test]
    async fn test_unrelated_update_patches_in_place() {
        let source = InMemorySource::new(vec![
            ListItem::bare("a").with_field("headline", "one"),
            ListItem::bare("b").with_field("headline", "two"),
            ListItem::bare("c").with_field("headline", "three"),
        ]);
        let mut list = LazyList::new(source.clone(), config());
        list.load_more().await.expect("load");

        source.replace(ListItem::bare("b").with_field("headline", "two, revised"));

        let feed = ChangeFeed::new();
        let mut patcher = LivePatcher::new(
            feed.subscribe(),
            &config(),
            fields_intersect(["state", "priority"]),
        );
        feed.publish(ResourceEvent::updated("b", ["headline"]))
            .expect("publish");

        let decision = patcher.apply_next(&mut list).await.expect("apply");
        assert!(matches!(decision, PatchDecision::Refresh(_)));

        // index assignment is undisturbed, content is fresh
        assert_eq!(list.window().index_of(&"b".into()), Some(1));
        assert_eq!(
            list.window()
                .get(1)
                .and_then(|i| i.field("headline"))
                .and_then(|v| v.as_str()),
            Some("two, revised")
        );
        assert_eq!(list.loaded_items_count(), 3);
    }

    #[tokio::test]
    async fn test_created_event_forces_reload() {
        let source = InMemorySource::new(vec![
            ListItem::bare("a").with_field("state", "published"),
            ListItem::bare("b").with_field("state", "published"),
            ListItem::bare("c").with_field("state", "published"),
        ]);
        let mut list = LazyList::new(source.clone(), config());
        list.load_more().await.expect("load");
        assert_eq!(list.loaded_items_count(), 3);

        // a new item appears in the backing collection
        source.insert(1, ListItem::bare("d").with_field("state", "published"));

        let feed = ChangeFeed::new();
        let mut patcher = LivePatcher::new(
            feed.subscribe(),
            &config(),
            fields_intersect(["state"]),
        );
        feed.publish(ResourceEvent::created("d", ["state", "headline"]))
            .expect("publish");

        let decision = patcher.apply_next(&mut list).await.expect("apply");
        assert_eq!(decision, PatchDecision::Reload);

        // repopulated from index 0, new item included at its position
        assert_eq!(list.loaded_items_count(), 4);
        assert_eq!(list.window().index_of(&"d".into()), Some(1));
    }
}
