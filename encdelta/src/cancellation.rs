//! Cooperative cancellation.
//!
//! The writer checks this between top-level changed types, not inside a
//! single type's member walk — cancelling mid-type would leave indices in a
//! state no caller can usefully inspect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{DeltaError, Result};

#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(DeltaError::Cancelled);
        }
        Ok(())
    }
}
