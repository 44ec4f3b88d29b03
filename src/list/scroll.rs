//! Scroll-Driven Loading
//!
//! Translates viewport geometry into load decisions. Scroll events fire
//! less often than a fetch round trip completes, so no rate limiting is
//! applied here; the Idle/Loading guard in the list is the only gate.

/// Geometry of the scrollable region, reported by the host on scroll
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    /// Scroll offset from the top of the content, in pixels
    pub scroll_top: f32,
    /// Visible height of the scrollable region
    pub viewport_height: f32,
    /// Total height of the content
    pub content_height: f32,
}

impl ViewportMetrics {
    /// Whether the content overflows the viewport
    ///
    /// Without a scrollbar the "scroll" event never fires, so lazy loading
    /// must keep fetching until one appears or the set is exhausted.
    pub fn has_scrollbar(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Whether the bottom edge is within `threshold` pixels
    pub fn reached_bottom(&self, threshold: f32) -> bool {
        self.content_height - (self.scroll_top + self.viewport_height) <= threshold
    }
}
