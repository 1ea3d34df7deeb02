//! Cooperative cancellation shared between a search and its controller

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stop signal polled by the search.
///
/// Clones share one flag, so a clone handed to another thread can stop a
/// search in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Whether `other` is a clone of this token
    #[inline]
    pub fn shares_flag(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
