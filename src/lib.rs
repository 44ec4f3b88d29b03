//! Newsdesk List Core
//!
//! The windowed, lazily paginated, live-patched item list behind the
//! Newsdesk editorial client's monitoring views, extracted as a UI-agnostic
//! library. Pages are fetched on demand as the user scrolls; change
//! notifications from the backend are batched and applied either as
//! in-place patches or as a full reload, depending on whether the active
//! query depends on the changed fields.

pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod list;
pub mod patch;
pub mod services;

pub use config::ListConfig;
pub use domain::{ChangeType, ItemId, ListItem, ResourceEvent};
pub use error::{Error, Result};
pub use list::{LazyList, LoadState, RenderProjection, ViewportMetrics, WindowCache};
pub use patch::{LivePatcher, PatchDecision, ReloadPredicate, classify_batch, fields_intersect};
pub use services::{ChangeFeed, InMemorySource, ItemPage, ItemSource};
