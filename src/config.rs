//! List Configuration
//!
//! Tunables for pagination, live-patch batching and scroll detection, with
//! TOML load/save helpers for hosts that persist settings.

use crate::constants::{
    DEFAULT_PAGE_SIZE, PATCH_BATCH_CAPACITY, PATCH_DEBOUNCE_MS, SCROLL_BOTTOM_THRESHOLD_PX,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a lazily loaded list
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ListConfig {
    /// Items fetched per page
    pub page_size: usize,
    /// Debounce window for coalescing change notifications, in milliseconds
    pub patch_debounce_ms: u64,
    /// Upper bound on notifications coalesced into one batch
    pub patch_batch_capacity: usize,
    /// Scroll-bottom detection threshold in pixels
    pub scroll_threshold_px: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            patch_debounce_ms: PATCH_DEBOUNCE_MS,
            patch_batch_capacity: PATCH_BATCH_CAPACITY,
            scroll_threshold_px: SCROLL_BOTTOM_THRESHOLD_PX,
        }
    }
}

/// Load a TOML config file, falling back to defaults if it does not exist
pub fn load_config(path: impl AsRef<Path>) -> Result<ListConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(ListConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: ListConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save a TOML config file
pub fn save_config(path: impl AsRef<Path>, config: &ListConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
