//! Content Items
//!
//! An item is an opaque record: a unique identifier plus a bag of fields.
//! The list core never interprets field semantics; field names only matter
//! to the caller-supplied reload predicate.

use serde_json::{Map, Value};
use std::sync::Arc;

/// Unique identifier for a content item
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ItemId(pub Arc<str>);

impl ItemId {
    /// Create a new ItemId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A content item as delivered by the backend
#[derive(Clone, Debug, PartialEq)]
pub struct ListItem {
    /// Unique item identifier
    pub id: ItemId,
    /// Opaque field bag (headline, state, priority, ...)
    fields: Map<String, Value>,
}

impl ListItem {
    /// Create a new item from an id and a field bag
    pub fn new(id: impl Into<ItemId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Create an item with no fields (id only)
    pub fn bare(id: impl Into<ItemId>) -> Self {
        Self::new(id, Map::new())
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, returning self (builder style)
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// All fields of the item
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_field_access() {
        let item = ListItem::bare("abc").with_field("headline", "Storm warning");

        assert_eq!(item.id.as_str(), "abc");
        assert_eq!(
            item.field("headline").and_then(|v| v.as_str()),
            Some("Storm warning")
        );
        assert!(item.field("missing").is_none());
    }
}
