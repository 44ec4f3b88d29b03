//! Teardown signalling
//!
//! A cheap shared flag set when the owner of a list is torn down. Any
//! collaborator assembling state from concurrent lookups must check it
//! before committing a result, dropping the result if the owner is gone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared abort flag
#[derive(Clone, Debug, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Create a new, unset signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner as torn down
    pub fn set(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    /// Whether teardown has been signalled
    pub fn is_set(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_signal_shared() {
        let signal = AbortSignal::new();
        let clone = signal.clone();

        assert!(!clone.is_set());
        signal.set();
        assert!(clone.is_set());
    }
}
