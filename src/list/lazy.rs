//! Lazy List
//!
//! Owner of the window cache and the Idle/Loading state machine. All page
//! fetches go through here so at most one fetch is outstanding at a time;
//! the guard is an explicit state check, not a convention.
//!
//! The host injects its collaborators explicitly: the item source, a
//! viewport probe for auto-fill, and a notify-renderer callback invoked
//! after every state mutation. The core has no dependency on any particular
//! UI scheduling model.

use crate::config::ListConfig;
use crate::domain::ItemId;
use crate::error::Result;
use crate::helpers::AbortSignal;
use crate::list::projection::RenderProjection;
use crate::list::scroll::ViewportMetrics;
use crate::list::window::WindowCache;
use crate::services::source::ItemSource;
use ahash::AHashSet;

/// Loading state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch outstanding
    Idle,
    /// A page fetch is in flight
    Loading,
}

type ViewportProbe = Box<dyn Fn() -> ViewportMetrics + Send>;
type RenderNotifier = Box<dyn Fn() + Send>;

/// A lazily paginated, live-patchable list over a remote collection
pub struct LazyList<S: ItemSource> {
    source: S,
    window: WindowCache,
    config: ListConfig,
    state: LoadState,
    viewport_probe: Option<ViewportProbe>,
    on_change: Option<RenderNotifier>,
    abort: AbortSignal,
}

impl<S: ItemSource> LazyList<S> {
    /// Create a list over the given source
    pub fn new(source: S, config: ListConfig) -> Self {
        Self {
            source,
            window: WindowCache::new(),
            config,
            state: LoadState::Idle,
            viewport_probe: None,
            on_change: None,
            abort: AbortSignal::new(),
        }
    }

    /// Inject the viewport probe used for auto-fill after merges
    ///
    /// Without a probe, auto-fill is disabled and only explicit calls load
    /// pages.
    pub fn with_viewport_probe(mut self, probe: impl Fn() -> ViewportMetrics + Send + 'static) -> Self {
        self.viewport_probe = Some(Box::new(probe));
        self
    }

    /// Inject the notify-renderer callback, invoked after state mutations
    pub fn with_on_change(mut self, on_change: impl Fn() + Send + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Teardown handle; set it to drop late fetch results on the floor
    pub fn abort_handle(&self) -> AbortSignal {
        self.abort.clone()
    }

    // ==================== Operations ====================

    /// Fetch the next page, starting at the current loaded count
    ///
    /// Suppressed while a fetch is already in flight. After merging, if the
    /// viewport probe reports no scrollbar and the set is not exhausted,
    /// keeps fetching: scroll-triggered loading could otherwise never fire
    /// because there is nothing to scroll.
    pub async fn load_more(&mut self) -> Result<()> {
        if self.state == LoadState::Loading {
            tracing::debug!("load_more suppressed, fetch already in flight");
            return Ok(());
        }

        self.state = LoadState::Loading;
        self.notify();

        loop {
            let from = self.window.loaded_count();
            let to = from + self.config.page_size;

            let page = match self.source.fetch_page(from, to).await {
                Ok(page) => page,
                Err(e) => {
                    // The state machine must not stay stuck in Loading on a
                    // failed fetch; the initiator decides what to do next.
                    self.state = LoadState::Idle;
                    self.notify();
                    tracing::warn!(from, to, error = %e, "Page fetch failed");
                    return Err(e);
                }
            };

            if self.abort.is_set() {
                tracing::debug!("Dropping page fetched after teardown");
                return Ok(());
            }

            tracing::debug!(
                from,
                to,
                fetched = page.items.len(),
                total = page.total_count,
                "Merging page"
            );
            let fetched = page.items.len();
            self.window.merge_page(from, page.items, page.total_count);

            // an empty page makes no progress; never spin on it
            if fetched == 0 {
                break;
            }

            let needs_fill = self
                .viewport_probe
                .as_ref()
                .is_some_and(|probe| !probe().has_scrollbar());
            if needs_fill && !self.window.all_loaded() {
                continue;
            }
            break;
        }

        self.state = LoadState::Idle;
        self.notify();
        Ok(())
    }

    /// Refresh already-loaded items by id, preserving their positions
    ///
    /// Ids not currently loaded are filtered out before the fetch; when the
    /// filter leaves nothing, no fetch is issued and state is unchanged.
    pub async fn update_items(&mut self, ids: &AHashSet<ItemId>) -> Result<()> {
        let loaded: Vec<ItemId> = ids
            .iter()
            .filter(|id| self.window.contains_id(*id))
            .cloned()
            .collect();

        if loaded.is_empty() {
            return Ok(());
        }

        let fresh = self.source.fetch_by_ids(&loaded).await?;

        if self.abort.is_set() {
            tracing::debug!("Dropping item refresh fetched after teardown");
            return Ok(());
        }

        tracing::debug!(refreshed = fresh.len(), "Patching items in place");
        self.window.apply_replacements(fresh);
        self.notify();
        Ok(())
    }

    /// Discard the window and restart pagination from index 0
    ///
    /// Used when the total count is believed stale or index positions may
    /// have shifted. Previously loaded items are discarded, never merged.
    pub async fn reset(&mut self) -> Result<()> {
        tracing::debug!("Resetting list");
        self.window.clear();
        // Recovers a list left Loading by an initiator that swallowed a
        // fetch error; reset must always be able to re-enter Loading.
        self.state = LoadState::Idle;
        self.notify();
        self.load_more().await
    }

    /// Scroll handler: load the next page when the bottom edge is reached
    ///
    /// Returns whether a load was triggered.
    pub async fn handle_scroll(&mut self, metrics: ViewportMetrics) -> Result<bool> {
        if self.state == LoadState::Loading || self.window.all_loaded() {
            return Ok(false);
        }

        if !metrics.reached_bottom(self.config.scroll_threshold_px) {
            return Ok(false);
        }

        self.load_more().await?;
        Ok(true)
    }

    // ==================== Queries ====================

    /// Whether every item of the set is loaded
    pub fn all_items_loaded(&self) -> bool {
        self.window.all_loaded()
    }

    /// Number of loaded entries
    pub fn loaded_items_count(&self) -> usize {
        self.window.loaded_count()
    }

    /// Authoritative size of the queried set
    pub fn total_count(&self) -> usize {
        self.window.total_count()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Read-only view of the loaded items in ascending index order
    pub fn projection(&self) -> RenderProjection {
        self.window.projection()
    }

    /// Direct access to the window cache
    pub fn window(&self) -> &WindowCache {
        &self.window
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }

    #[cfg(test)]
    fn force_state(&mut self, state: LoadState) {
        self.state = state;
    }
}
