//! Change Notifications
//!
//! Events the backend pushes when items in the remote collection change.
//! These arrive out of band (websocket in the full client) and are consumed
//! by the live patch applier.

use crate::domain::item::ItemId;
use ahash::AHashSet;
use chrono::{DateTime, Utc};

/// Kind of change reported by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
    /// A new item was created.
    ///
    /// Notification sources are expected to report all of the item's fields
    /// as affected; a brand-new item can only be discovered by a reload, so
    /// a reload predicate should always fire for it.
    Created,
    /// An existing item was updated
    Updated,
    /// An item was deleted
    Deleted,
}

/// A single change notification
#[derive(Clone, Debug)]
pub struct ResourceEvent {
    /// What happened
    pub change: ChangeType,
    /// Identifier of the affected item
    pub id: ItemId,
    /// Names of the fields the change touched
    pub fields: AHashSet<String>,
    /// When the backend recorded the change
    pub ts: DateTime<Utc>,
}

impl ResourceEvent {
    /// Create a notification with the current timestamp
    pub fn new(
        change: ChangeType,
        id: impl Into<ItemId>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            change,
            id: id.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            ts: Utc::now(),
        }
    }

    /// Shorthand for an update notification
    pub fn updated(
        id: impl Into<ItemId>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(ChangeType::Updated, id, fields)
    }

    /// Shorthand for a creation notification
    pub fn created(
        id: impl Into<ItemId>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(ChangeType::Created, id, fields)
    }

    /// Shorthand for a deletion notification
    pub fn deleted(
        id: impl Into<ItemId>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(ChangeType::Deleted, id, fields)
    }
}
