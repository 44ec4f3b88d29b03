//! Tokio Runtime Bridge
//!
//! Host UI event loops are synchronous and cooperative, while fetches are
//! async. This module owns an embedded tokio runtime so a synchronous host
//! can drive the list core without bringing its own executor.

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Block on a future synchronously
///
/// Used by synchronous hosts to run one list operation to completion, e.g.
/// a `load_more` triggered from a scroll handler.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

/// Spawn a detached task in the tokio runtime
///
/// Used for long-running background loops like the live patch applier.
pub fn spawn_in_tokio<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    get_runtime().spawn(future);
}

/// Get a handle to the tokio runtime for advanced use cases
pub fn runtime_handle() -> tokio::runtime::Handle {
    get_runtime().handle().clone()
}
