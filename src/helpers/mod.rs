//! Shared helpers

pub mod abort;

pub use abort::AbortSignal;
