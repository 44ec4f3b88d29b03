//! Service layer
//!
//! External collaborators of the list core: the remote item store (page and
//! id fetchers), the change notification feed, and the tokio runtime bridge.

pub mod notification;
pub mod runtime;
pub mod source;

pub use notification::ChangeFeed;
pub use source::{InMemorySource, ItemPage, ItemSource};
