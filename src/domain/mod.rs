//! Domain types
//!
//! Data model for the list core: opaque content items and the change
//! notifications the backend emits about them.

pub mod event;
pub mod item;

pub use event::{ChangeType, ResourceEvent};
pub use item::{ItemId, ListItem};
