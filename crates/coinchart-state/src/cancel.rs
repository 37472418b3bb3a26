// File: crates/coinchart-state/src/cancel.rs
// Summary: Shared cancellation flag passed into long-running fetches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::FetchError;

/// Clones share one flag; cancelling any clone cancels all of them.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancelled; for use with `?` between fetch steps.
    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_cancelled() { Err(FetchError::Cancelled) } else { Ok(()) }
    }
}
