//! Change Notification Feed
//!
//! Multiplexes change notifications from the backend (a websocket in the
//! full client) into a single channel the live patch applier drains.
//! Subscribing hands out a receiver; dropping the receiver unsubscribes.

use crate::domain::ResourceEvent;
use crate::error::{Error, Result};
use crossbeam_channel::{Receiver, Sender};

/// Publish/subscribe hub for change notifications
pub struct ChangeFeed {
    tx: Sender<ResourceEvent>,
    rx: Receiver<ResourceEvent>,
}

impl ChangeFeed {
    /// Create a new feed
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Publish a notification to all subscribers
    pub fn publish(&self, event: ResourceEvent) -> Result<()> {
        self.tx.send(event).map_err(|e| Error::ChannelSend {
            message: e.to_string(),
        })
    }

    /// Get a sender handle for the notification producer side
    pub fn publisher(&self) -> Sender<ResourceEvent> {
        self.tx.clone()
    }

    /// Subscribe to the feed
    ///
    /// Events are multiplexed into this single channel. Drop the receiver
    /// to unsubscribe.
    pub fn subscribe(&self) -> Receiver<ResourceEvent> {
        self.rx.clone()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ChangeFeed {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceEvent;

    #[test]
    fn test_publish_reaches_subscriber() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe();

        feed.publish(ResourceEvent::updated("a1", ["headline"]))
            .expect("publish");

        let event = rx.try_recv().expect("event");
        assert_eq!(event.id.as_str(), "a1");
        assert!(event.fields.contains("headline"));
    }
}
