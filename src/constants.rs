//! List Core Constants
//!
//! Centralized constants for pagination, live-patch batching and scrolling.

/// Default number of items fetched per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Live-patch batching
///
/// Bursts of change notifications (bulk operations on the backend) are
/// coalesced into one batch per debounce window instead of one fetch each.
pub const PATCH_DEBOUNCE_MS: u64 = 500;
pub const PATCH_BATCH_CAPACITY: usize = 1024;

/// Scroll-bottom detection threshold in pixels
///
/// The bottom edge counts as reached when the remaining scrollable distance
/// is at most this many pixels.
pub const SCROLL_BOTTOM_THRESHOLD_PX: f32 = 1.0;
