//! The windowed list core
//!
//! A sparse, index-keyed window over a remote collection, lazily paginated
//! and patched in place from live change notifications.

pub mod lazy;
pub mod projection;
pub mod scroll;
pub mod window;

pub use lazy::{LazyList, LoadState};
pub use projection::RenderProjection;
pub use scroll::ViewportMetrics;
pub use window::WindowCache;
