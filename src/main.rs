//! Newsdesk List Demo - Main Entry Point
//!
//! Headless wiring of the list core against an in-memory backend: paginate
//! a collection, push change notifications through the live patcher, and
//! log the resulting projection.

use newsdesk_list::services::runtime;
use newsdesk_list::{
    ChangeFeed, InMemorySource, LazyList, ListItem, LivePatcher, ResourceEvent, config,
    fields_intersect,
};

fn sample_items(n: usize) -> Vec<ListItem> {
    (0..n)
        .map(|i| {
            ListItem::bare(uuid::Uuid::new_v4().to_string())
                .with_field("headline", format!("Story #{i}"))
                .with_field("state", "published")
                .with_field("priority", (i % 5) as i64)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = config::load_config("newsdesk-list.toml")?;
    tracing::info!(page_size = config.page_size, "Starting list demo");

    let source = InMemorySource::new(sample_items(120));
    let feed = ChangeFeed::new();

    let mut list = LazyList::new(source.clone(), config.clone())
        .with_on_change(|| tracing::debug!("Renderer notified"));
    let mut patcher = LivePatcher::new(
        feed.subscribe(),
        &config,
        fields_intersect(["state", "priority"]),
    );

    runtime::block_on(async move {
        // paginate until the whole set is loaded
        while !list.all_items_loaded() {
            list.load_more().await?;
            tracing::info!(
                loaded = list.loaded_items_count(),
                total = list.total_count(),
                "Loaded page"
            );
        }

        // an unrelated edit arrives: patched in place, no reload
        let first_id = list
            .projection()
            .next()
            .map(|item| item.id.clone())
            .ok_or_else(|| anyhow::anyhow!("empty projection"))?;
        source.replace(
            ListItem::bare(first_id.as_str())
                .with_field("headline", "Story #0 (updated)")
                .with_field("state", "published"),
        );
        feed.publish(ResourceEvent::updated(first_id.as_str(), ["headline"]))?;

        let decision = patcher.apply_next(&mut list).await?;
        tracing::info!(?decision, "Applied notification batch");

        for (index, item) in list.projection().with_indices().take(5) {
            tracing::info!(
                index,
                id = %item.id,
                headline = item.field("headline").and_then(|v| v.as_str()),
                "Row"
            );
        }

        Ok(())
    })
}
